use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

// 用户菜单节点，`parent_id == 0` 表示顶级菜单
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: i64,
    #[serde(default)]
    pub parent_id: i64,
    pub name: String,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub component: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub sort_order: Option<i32>,
    #[serde(default)]
    pub children: Vec<MenuItem>,
}

fn default_visible() -> bool {
    true
}

fn attach_children(menu: &mut MenuItem, children: &mut HashMap<i64, Vec<MenuItem>>) {
    if let Some(mut direct) = children.remove(&menu.id) {
        for child in &mut direct {
            attach_children(child, children);
        }
        sort_siblings(&mut direct);
        menu.children.extend(direct);
    }
}

fn sort_siblings(menus: &mut [MenuItem]) {
    menus.sort_by_key(|m| (m.sort_order.unwrap_or(i32::MAX), m.id));
}

impl MenuItem {
    /// 深度优先遍历，回调参数为 (深度, 节点)
    pub fn walk<'a>(&'a self, depth: usize, visit: &mut impl FnMut(usize, &'a MenuItem)) {
        visit(depth, self);
        for child in &self.children {
            child.walk(depth + 1, visit);
        }
    }

    /// 由 `/menus` 返回的平铺列表构建菜单树
    ///
    /// 父节点不存在（或形成环）的菜单提升为顶级菜单；同级按 `sort_order`、`id` 排序。
    pub fn build_tree(flat: Vec<MenuItem>) -> Vec<MenuItem> {
        let ids: HashSet<i64> = flat.iter().map(|m| m.id).collect();
        let mut children: HashMap<i64, Vec<MenuItem>> = HashMap::new();
        let mut roots = Vec::new();

        for menu in flat {
            if menu.parent_id != 0 && menu.parent_id != menu.id && ids.contains(&menu.parent_id) {
                children.entry(menu.parent_id).or_default().push(menu);
            } else {
                roots.push(menu);
            }
        }

        for root in &mut roots {
            attach_children(root, &mut children);
        }
        // 剩下的只可能是环上的节点
        loop {
            let Some(parent_id) = children.keys().next().copied() else {
                break;
            };
            let mut orphans = children.remove(&parent_id).unwrap_or_default();
            for orphan in &mut orphans {
                attach_children(orphan, &mut children);
            }
            roots.extend(orphans);
        }

        sort_siblings(&mut roots);
        roots
    }

    /// 收集所有可见节点的路由路径
    pub fn visible_paths(menus: &[MenuItem]) -> Vec<String> {
        let mut paths = Vec::new();
        for menu in menus.iter().filter(|m| m.visible) {
            menu.walk(0, &mut |_, item| {
                if item.visible
                    && let Some(path) = &item.path
                {
                    paths.push(path.clone());
                }
            });
        }
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Vec<MenuItem> {
        serde_json::from_str(
            r#"[
                {"id":1,"parentId":0,"name":"系统管理","path":"/system","sortOrder":1,"children":[
                    {"id":2,"parentId":1,"name":"用户管理","path":"/system/users"},
                    {"id":3,"parentId":1,"name":"审计日志","path":"/system/audit","visible":false}
                ]},
                {"id":4,"parentId":0,"name":"笔记","path":"/notes","visible":false}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_visible_paths_skip_hidden_nodes() {
        let paths = MenuItem::visible_paths(&sample_tree());
        assert_eq!(paths, vec!["/system", "/system/users"]);
    }

    #[test]
    fn test_walk_reports_depth() {
        let tree = sample_tree();
        let mut depths = Vec::new();
        tree[0].walk(0, &mut |depth, item| depths.push((depth, item.id)));
        assert_eq!(depths, vec![(0, 1), (1, 2), (1, 3)]);
    }

    #[test]
    fn test_build_tree_from_flat_list() {
        let flat: Vec<MenuItem> = serde_json::from_str(
            r#"[
                {"id":2,"parentId":1,"name":"用户管理","sortOrder":2},
                {"id":5,"parentId":1,"name":"角色管理","sortOrder":1},
                {"id":1,"parentId":0,"name":"系统管理","sortOrder":1},
                {"id":4,"parentId":0,"name":"笔记"},
                {"id":9,"parentId":42,"name":"孤儿"},
                {"id":6,"parentId":2,"name":"导出"}
            ]"#,
        )
        .unwrap();

        let tree = MenuItem::build_tree(flat);
        let roots: Vec<i64> = tree.iter().map(|m| m.id).collect();
        assert_eq!(roots, vec![1, 4, 9]);

        let mut order = Vec::new();
        tree[0].walk(0, &mut |depth, item| order.push((depth, item.id)));
        assert_eq!(order, vec![(0, 1), (1, 5), (1, 2), (2, 6)]);
    }

    #[test]
    fn test_build_tree_breaks_cycles() {
        let flat: Vec<MenuItem> = serde_json::from_str(
            r#"[
                {"id":1,"parentId":2,"name":"a"},
                {"id":2,"parentId":1,"name":"b"}
            ]"#,
        )
        .unwrap();

        let tree = MenuItem::build_tree(flat);
        let mut count = 0;
        for menu in &tree {
            menu.walk(0, &mut |_, _| count += 1);
        }
        assert_eq!(count, 2);
    }
}
