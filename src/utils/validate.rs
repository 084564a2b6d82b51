use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^1[3-9]\d{9}$").expect("Invalid phone regex"));

pub fn validate_required(value: &str, message: &'static str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        return Err(message);
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    validate_required(username, "Username is required")?;
    // 用户名长度校验：4 <= x <= 50（按字符计）
    let len = username.chars().count();
    if !(4..=50).contains(&len) {
        return Err("Username length must be between 4 and 50 characters");
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.is_empty() {
        return Err("Password is required");
    }
    if password.chars().count() < 6 {
        return Err("Password must be at least 6 characters long");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    validate_required(email, "Email is required")?;
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 中国大陆手机号：1 开头，第二位 3-9，共 11 位
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    validate_required(phone, "Phone number is required")?;
    if !PHONE_RE.is_match(phone) {
        return Err("Phone number format is invalid");
    }
    Ok(())
}
