use std::process::ExitCode;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, Parser, Subcommand, ValueEnum};
use dotenv::dotenv;
use human_panic::setup_panic;
use tracing::{debug, warn};

use logindemo_client::config::AppConfig;
use logindemo_client::errors::{ClientError, Result};
use logindemo_client::models::audit::{AuditLogQuery, AuditStatus};
use logindemo_client::models::auth::{
    LoginRequest, RegisterRequest, ResetChannel, ResetPasswordRequest,
};
use logindemo_client::models::menus::{MenuItem, MenuRequest};
use logindemo_client::models::notes::NoteRequest;
use logindemo_client::models::roles::RoleRequest;
use logindemo_client::models::users::{CreateUserRequest, UserStatus};
use logindemo_client::runtime::gate::RootScreen;
use logindemo_client::runtime::lifetime::startup::{ClientContext, prepare_client};

#[derive(Parser, Debug)]
#[command(author, version, about = "Command-line client for the login demo backend", long_about = None)]
struct Cli {
    /// Override the API base URL from configuration
    #[arg(long, env = "API_BASE_URL", global = true)]
    api: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in with username and password
    Login {
        username: String,
        password: String,
        /// Captcha key returned by `captcha`
        #[arg(long, requires = "captcha_code")]
        captcha_key: Option<String>,
        #[arg(long, requires = "captcha_key")]
        captcha_code: Option<String>,
    },
    /// Sign in with a phone number and SMS code
    LoginPhone { phone: String, code: String },
    /// Request an SMS verification code
    SendSms { phone: String },
    /// Create an account and sign in
    Register {
        username: String,
        password: String,
        email: String,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Request a password-reset code by email
    SendEmail { email: String },
    /// Reset a forgotten password with an email or SMS code
    ResetPassword {
        /// Email address or phone number
        account: String,
        code: String,
        new_password: String,
        /// The account is a phone number
        #[arg(long)]
        phone: bool,
    },
    /// Sign out and clear local credentials
    Logout,
    /// Show the current session
    Status {
        /// Ask the server whether the stored token is still valid
        #[arg(long)]
        verify: bool,
    },
    /// Fetch the current user's profile
    Me,
    /// Print the current user's menu tree
    Menu,
    /// Exchange the refresh token for a new token pair
    Refresh,
    /// Fetch a captcha image (for accounts locked after failed logins)
    Captcha {
        /// Only check whether the username currently requires a captcha
        #[arg(long)]
        username: Option<String>,
    },
    /// Sign in by scanning a WeChat QR code
    Wechat {
        /// Seconds between status polls
        #[arg(long, default_value_t = 2)]
        interval: u64,
        #[arg(long, default_value_t = 60)]
        attempts: u32,
    },
    /// Manage user accounts (administrators)
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Manage roles (administrators)
    Roles {
        #[command(subcommand)]
        action: RoleAction,
    },
    /// Manage the menu catalogue (administrators)
    Menus {
        #[command(subcommand)]
        action: MenuAction,
    },
    /// Manage your notes
    Notes {
        #[command(subcommand)]
        action: NoteAction,
    },
    /// Browse audit logs (administrators)
    Audit {
        #[command(subcommand)]
        action: AuditAction,
    },
}

#[derive(Subcommand, Debug)]
enum UserAction {
    List,
    Add {
        username: String,
        password: String,
        email: String,
        #[arg(long)]
        phone: Option<String>,
        /// Create the account disabled
        #[arg(long)]
        disabled: bool,
    },
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
enum RoleAction {
    List,
    Add {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    Update {
        id: i64,
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    Delete { id: i64 },
}

#[derive(Args, Debug)]
struct MenuArgs {
    name: String,
    key: String,
    path: String,
    /// Parent menu id, 0 for a top-level menu
    #[arg(long, default_value_t = 0)]
    parent: i64,
    #[arg(long)]
    sort: Option<i32>,
    #[arg(long)]
    icon: Option<String>,
    #[arg(long)]
    component: Option<String>,
    #[arg(long)]
    hidden: bool,
}

impl From<MenuArgs> for MenuRequest {
    fn from(args: MenuArgs) -> Self {
        MenuRequest {
            parent_id: args.parent,
            name: args.name,
            key: args.key,
            path: args.path,
            component: args.component,
            icon: args.icon,
            visible: !args.hidden,
            sort_order: args.sort,
        }
    }
}

#[derive(Subcommand, Debug)]
enum MenuAction {
    /// Print every menu as a tree
    List,
    Add(MenuArgs),
    Update {
        id: i64,
        #[command(flatten)]
        menu: MenuArgs,
    },
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
enum NoteAction {
    List,
    Show { id: i64 },
    Add {
        title: String,
        #[arg(long)]
        content: Option<String>,
    },
    Edit {
        id: i64,
        title: String,
        #[arg(long)]
        content: Option<String>,
    },
    Delete { id: i64 },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StatusFilter {
    Success,
    Failure,
}

#[derive(Subcommand, Debug)]
enum AuditAction {
    /// Search audit logs
    Query {
        #[arg(long)]
        username: Option<String>,
        /// Operation type, see `audit types`
        #[arg(long)]
        operation: Option<String>,
        #[arg(long, value_enum)]
        status: Option<StatusFilter>,
        /// Start time, `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`
        #[arg(long, value_parser = parse_time)]
        from: Option<NaiveDateTime>,
        #[arg(long, value_parser = parse_time)]
        to: Option<NaiveDateTime>,
        #[arg(long, default_value_t = 1)]
        page: i64,
        #[arg(long, default_value_t = 10)]
        page_size: i64,
    },
    /// List the operation types that can be filtered on
    Types,
}

fn parse_time(value: &str) -> std::result::Result<NaiveDateTime, String> {
    let value = value.trim();
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(time) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(time);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| format!("invalid time '{value}', expected YYYY-MM-DD [HH:MM:SS]"))
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    setup_panic!();

    let cli = Cli::parse();

    // 初始化配置
    if let Err(e) = AppConfig::init() {
        eprintln!("Failed to initialize configuration: {e}");
        return ExitCode::FAILURE;
    }
    let config = AppConfig::get();

    // 初始化日志
    let stdout_log = std::io::stdout();
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(stdout_log);
    let filter = tracing_subscriber::EnvFilter::new(&config.app.log_level);
    let tracing_format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(true);

    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking_writer)
        .event_format(tracing_format);

    if config.is_development() {
        tracing_builder
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        tracing_builder.json().init();
    }

    debug!(
        "Starting {} v{} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.app.environment
    );

    let mut config = config.clone();
    if let Some(api) = cli.api {
        config.api.base_url = api;
    }

    let result = match prepare_client(&config).await {
        Ok(context) => run(&context, cli.command).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_unexpected() => {
            // 细节只进日志，终端给出通用提示
            warn!("{}", e);
            eprintln!("Something went wrong, please try again later");
            ExitCode::FAILURE
        }
        Err(e) => {
            // 只输出一行提示，不暴露调用栈
            eprintln!("{}", e.message());
            if e.requires_login() {
                eprintln!("Run `login` to sign in again.");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(context: &ClientContext, command: Command) -> Result<()> {
    let session = &context.session;

    match command {
        Command::Login {
            username,
            password,
            captcha_key,
            captcha_code,
        } => {
            let mut request = LoginRequest::new(username, password);
            if let (Some(key), Some(code)) = (captcha_key, captcha_code) {
                request = request.with_captcha(key, code);
            }
            let auth = session.login(request).await?;
            match auth.profile {
                Some(profile) => println!("Logged in as {}", profile.display_name()),
                None => println!("Logged in"),
            }
        }
        Command::LoginPhone { phone, code } => {
            session.login_by_phone(&phone, &code).await?;
            println!("Logged in");
        }
        Command::SendSms { phone } => {
            session.send_sms_code(&phone).await?;
            println!("Verification code sent");
        }
        Command::Register {
            username,
            password,
            email,
            phone,
        } => {
            let auth = session
                .register(RegisterRequest {
                    username,
                    password,
                    email,
                    phone,
                })
                .await?;
            let name = auth
                .profile
                .map(|p| p.username)
                .unwrap_or_else(|| "new user".to_string());
            println!("Registered and logged in as {name}");
        }
        Command::SendEmail { email } => {
            session.send_email_code(&email).await?;
            println!("Verification code sent, please check your inbox");
        }
        Command::ResetPassword {
            account,
            code,
            new_password,
            phone,
        } => {
            let channel = if phone {
                ResetChannel::Phone
            } else {
                ResetChannel::Email
            };
            session
                .reset_password(ResetPasswordRequest {
                    channel,
                    account,
                    code,
                    new_password,
                })
                .await?;
            println!("Password reset, please log in with the new password");
        }
        Command::Logout => {
            session.logout().await;
            println!("Logged out");
        }
        Command::Status { verify } => {
            let root = context.gate().root().await;
            if root == RootScreen::Unauthenticated {
                println!("Not logged in");
                return Ok(());
            }
            match session.cached_profile().await {
                Some(profile) => println!("Logged in as {} (id {})", profile.username, profile.id),
                None => println!("Logged in"),
            }
            if verify {
                let valid = session.validate_token().await?;
                println!("Server says token is {}", if valid { "valid" } else { "invalid" });
            }
        }
        Command::Me => {
            let me = context.users.current_user().await?;
            println!("id:       {}", me.id);
            println!("username: {}", me.username);
            if let Some(email) = &me.email {
                println!("email:    {email}");
            }
            if let Some(phone) = &me.phone {
                println!("phone:    {phone}");
            }
        }
        Command::Menu => {
            let menus = context.users.user_menu().await?;
            if menus.is_empty() {
                println!("No menu entries");
            }
            for menu in &menus {
                print_menu(menu);
            }
        }
        Command::Refresh => {
            if !session.refresh_access_token().await {
                return Err(ClientError::session_expired(
                    "Login expired, please login again",
                ));
            }
            println!("Token refreshed");
        }
        Command::Captcha { username } => match username {
            Some(username) => {
                let required = session.captcha_required(&username).await?;
                println!("Captcha required: {required}");
            }
            None => {
                let captcha = session.captcha_image().await?;
                println!("key:   {}", captcha.captcha_key);
                println!("image: {}", captcha.image);
            }
        },
        Command::Wechat { interval, attempts } => {
            let qrcode = session.wechat_qrcode().await?;
            println!("Scan to log in: {}", qrcode.qrcode_url);
            println!("Expires in {} seconds", qrcode.expire_seconds);

            let auth = session
                .poll_wechat_login(&qrcode.ticket, Duration::from_secs(interval), attempts)
                .await?;
            match auth.profile {
                Some(profile) => println!("Logged in as {}", profile.display_name()),
                None => println!("Logged in"),
            }
        }
        Command::Users { action } => run_users(context, action).await?,
        Command::Roles { action } => run_roles(context, action).await?,
        Command::Menus { action } => run_menus(context, action).await?,
        Command::Notes { action } => run_notes(context, action).await?,
        Command::Audit { action } => run_audit(context, action).await?,
    }

    Ok(())
}

async fn run_users(context: &ClientContext, action: UserAction) -> Result<()> {
    match action {
        UserAction::List => {
            for user in context.users.list_users().await? {
                let status = match user.status {
                    UserStatus::Enabled => "enabled",
                    UserStatus::Disabled => "disabled",
                };
                println!(
                    "{:>5}  {:<20} {:<28} {:<12} {}",
                    user.id,
                    user.username,
                    user.email.as_deref().unwrap_or("-"),
                    user.phone.as_deref().unwrap_or("-"),
                    status
                );
            }
        }
        UserAction::Add {
            username,
            password,
            email,
            phone,
            disabled,
        } => {
            let status = if disabled {
                UserStatus::Disabled
            } else {
                UserStatus::Enabled
            };
            context
                .users
                .create_user(CreateUserRequest {
                    username,
                    password,
                    email,
                    phone,
                    status,
                })
                .await?;
            println!("User created");
        }
        UserAction::Delete { id } => {
            context.users.delete_user(id).await?;
            println!("User {id} deleted");
        }
    }
    Ok(())
}

async fn run_roles(context: &ClientContext, action: RoleAction) -> Result<()> {
    match action {
        RoleAction::List => {
            for role in context.roles.list_roles().await? {
                println!(
                    "{:>5}  {:<20} {}",
                    role.id,
                    role.name,
                    role.description.as_deref().unwrap_or("")
                );
            }
        }
        RoleAction::Add { name, description } => {
            let role = context
                .roles
                .create_role(RoleRequest { name, description })
                .await?;
            println!("Role {} created with id {}", role.name, role.id);
        }
        RoleAction::Update {
            id,
            name,
            description,
        } => {
            context
                .roles
                .update_role(id, RoleRequest { name, description })
                .await?;
            println!("Role {id} updated");
        }
        RoleAction::Delete { id } => {
            context.roles.delete_role(id).await?;
            println!("Role {id} deleted");
        }
    }
    Ok(())
}

async fn run_menus(context: &ClientContext, action: MenuAction) -> Result<()> {
    match action {
        MenuAction::List => {
            let tree = context.menus.menu_tree().await?;
            if tree.is_empty() {
                println!("No menu entries");
            }
            for menu in &tree {
                menu.walk(0, &mut |depth, item| {
                    let hidden = if item.visible { "" } else { " [hidden]" };
                    println!(
                        "{}{} #{} ({}){}",
                        "  ".repeat(depth),
                        item.name,
                        item.id,
                        item.path.as_deref().unwrap_or("-"),
                        hidden
                    );
                });
            }
        }
        MenuAction::Add(args) => {
            let menu = context.menus.create_menu(args.into()).await?;
            println!("Menu {} created with id {}", menu.name, menu.id);
        }
        MenuAction::Update { id, menu } => {
            context.menus.update_menu(id, menu.into()).await?;
            println!("Menu {id} updated");
        }
        MenuAction::Delete { id } => {
            context.menus.delete_menu(id).await?;
            println!("Menu {id} deleted");
        }
    }
    Ok(())
}

async fn run_notes(context: &ClientContext, action: NoteAction) -> Result<()> {
    match action {
        NoteAction::List => {
            let notes = context.notes.list_notes().await?;
            if notes.is_empty() {
                println!("No notes");
            }
            for note in notes {
                println!("{:>5}  {}", note.id, note.title);
            }
        }
        NoteAction::Show { id } => {
            let note = context.notes.get_note(id).await?;
            println!("# {}", note.title);
            if let Some(updated) = note.updated_at.or(note.created_at) {
                println!("({updated})");
            }
            println!();
            println!("{}", note.content.unwrap_or_default());
        }
        NoteAction::Add { title, content } => {
            let note = context
                .notes
                .create_note(NoteRequest { title, content })
                .await?;
            println!("Note created with id {}", note.id);
        }
        NoteAction::Edit { id, title, content } => {
            context
                .notes
                .update_note(id, NoteRequest { title, content })
                .await?;
            println!("Note {id} updated");
        }
        NoteAction::Delete { id } => {
            context.notes.delete_note(id).await?;
            println!("Note {id} deleted");
        }
    }
    Ok(())
}

async fn run_audit(context: &ClientContext, action: AuditAction) -> Result<()> {
    match action {
        AuditAction::Query {
            username,
            operation,
            status,
            from,
            to,
            page,
            page_size,
        } => {
            let query = AuditLogQuery {
                username,
                operation_type: operation,
                status: status.map(|s| match s {
                    StatusFilter::Success => AuditStatus::Success,
                    StatusFilter::Failure => AuditStatus::Failure,
                }),
                start_time: from,
                end_time: to,
                page,
                page_size,
                ..Default::default()
            };
            let logs = context.audit.query_logs(query).await?;
            for log in &logs.list {
                let time = log
                    .created_at
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{}  {:<12} {:<16} {:?}  {}",
                    time,
                    log.username.as_deref().unwrap_or("-"),
                    log.operation_type,
                    log.status,
                    log.operation_desc.as_deref().unwrap_or("")
                );
            }
            println!(
                "Page {}/{} ({} entries)",
                logs.page,
                logs.total_pages(),
                logs.total
            );
        }
        AuditAction::Types => {
            for operation in context.audit.operation_types().await? {
                println!("{operation}");
            }
        }
    }
    Ok(())
}

fn print_menu(menu: &MenuItem) {
    if !menu.visible {
        debug!("Skipping hidden menu '{}'", menu.name);
        return;
    }
    menu.walk(0, &mut |depth, item| {
        if item.visible {
            let path = item.path.as_deref().unwrap_or("-");
            println!("{}{} ({})", "  ".repeat(depth), item.name, path);
        }
    });
}
