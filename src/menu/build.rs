//! Menu synthesis.
//!
//! Transforms a configuration document plus platform-resolved metadata
//! into the abstract menu tree. Invalid entries are reported and skipped,
//! failed resolutions are dropped silently, and the rest of the menu always
//! builds.

use crate::config::{AppInfo, Document, ItemKind, MenuEntry};
use crate::menu::item::{ItemInfo, MenuAction, MenuNode};
use crate::platform::ItemResolver;
use crate::system::Notifier;
use tracing::debug;

/// Checkbox id of the "Enable Logs" settings leaf.
pub const ENABLE_LOGS_ID: &str = "enable-logs";

/// Builds the full menu tree for one refresh.
pub struct MenuSynthesizer<'a> {
    resolver: &'a dyn ItemResolver,
    notifier: &'a dyn Notifier,
}

impl<'a> MenuSynthesizer<'a> {
    pub fn new(resolver: &'a dyn ItemResolver, notifier: &'a dyn Notifier) -> Self {
        MenuSynthesizer { resolver, notifier }
    }

    /// Synthesizes the top-level tree: sorted category submenus, the flat
    /// section, the settings subtree, and the exit leaf.
    pub fn build(&self, document: &Document) -> Vec<MenuNode> {
        let mut nodes = self.build_categories(document);
        if !document.no_menu.is_empty() {
            nodes.push(MenuNode::Separator);
            // A flat section whose items all dropped is omitted outright;
            // only categories keep a disabled placeholder node.
            nodes.extend(
                self.resolve_entries(&document.no_menu)
                    .into_iter()
                    .map(item_node),
            );
        }
        nodes.push(MenuNode::Separator);
        nodes.push(self.build_settings(document));
        nodes.push(MenuNode::leaf("Exit", MenuAction::Quit));
        nodes
    }

    /// One submenu per category, in key order. A category whose items all
    /// dropped stays visible but disabled. No categories at all yields the
    /// single "Empty" placeholder.
    fn build_categories(&self, document: &Document) -> Vec<MenuNode> {
        if document.others.is_empty() {
            return vec![MenuNode::disabled("Empty")];
        }
        document
            .others
            .iter()
            .map(|(name, items)| {
                let children: Vec<MenuNode> = self
                    .resolve_entries(items)
                    .into_iter()
                    .map(item_node)
                    .collect();
                MenuNode::SubMenu {
                    label: name.clone(),
                    enabled: !children.is_empty(),
                    children,
                }
            })
            .collect()
    }

    /// Validates an entry, reporting rejections through the notifier.
    pub fn validate(&self, entry: &MenuEntry) -> bool {
        if entry.name.is_empty() {
            self.notifier.error(&format!("Invalid Item: {}", entry.name));
            return false;
        }
        if ItemKind::parse(&entry.kind).is_none() {
            self.notifier.error(&format!(
                "Invalid Item Type: {}, from name: {}",
                entry.kind, entry.name
            ));
            return false;
        }
        true
    }

    /// Validates and resolves a batch. Survivors keep their input order;
    /// one bad entry never aborts the rest.
    pub fn resolve_entries(&self, entries: &[MenuEntry]) -> Vec<ItemInfo> {
        let mut infos = Vec::new();
        for entry in entries {
            if !self.validate(entry) {
                continue;
            }
            match self.resolver.resolve(entry) {
                Ok(info) => infos.push(info),
                Err(err) => {
                    debug!(name = %entry.name, %err, "item dropped: resolution failed");
                }
            }
        }
        infos
    }

    fn build_settings(&self, document: &Document) -> MenuNode {
        MenuNode::SubMenu {
            label: "Settings".to_string(),
            enabled: true,
            children: vec![
                MenuNode::leaf("Update Menu", MenuAction::UpdateMenu),
                MenuNode::leaf("Select/Change JSON file", MenuAction::SelectConfigFile),
                MenuNode::Checkbox {
                    id: ENABLE_LOGS_ID.to_string(),
                    label: "Enable Logs".to_string(),
                    enabled: true,
                    checked: document.enable_logs,
                },
                MenuNode::SubMenu {
                    label: "About".to_string(),
                    enabled: true,
                    children: vec![
                        MenuNode::disabled(format!("Name: {}", AppInfo::NAME)),
                        MenuNode::disabled(format!("Version: {}", AppInfo::VERSION)),
                        MenuNode::disabled(format!("Release Date: {}", AppInfo::RELEASE_DATE)),
                    ],
                },
            ],
        }
    }
}

fn item_node(info: ItemInfo) -> MenuNode {
    MenuNode::Standard {
        label: info.name.clone(),
        icon_path: info.icon.clone(),
        enabled: true,
        action: MenuAction::Launch(info),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use crate::system::Severity;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Resolver that fabricates `run <name>` commands and fails on request.
    struct FakeResolver {
        failing: HashSet<String>,
    }

    impl FakeResolver {
        fn ok() -> Self {
            FakeResolver {
                failing: HashSet::new(),
            }
        }

        fn failing_on(names: &[&str]) -> Self {
            FakeResolver {
                failing: names.iter().map(|n| n.to_string()).collect(),
            }
        }
    }

    impl ItemResolver for FakeResolver {
        fn prepare(&mut self, _force_reload: bool) -> Result<()> {
            Ok(())
        }

        fn resolve(&self, entry: &MenuEntry) -> Result<ItemInfo> {
            if self.failing.contains(&entry.name) {
                return Err(Error::ItemNotFound {
                    name: entry.name.clone(),
                });
            }
            Ok(ItemInfo {
                name: entry.name.clone(),
                icon: None,
                exec: format!("run {}", entry.name),
            })
        }

        fn clear(&mut self) {}
    }

    #[derive(Default)]
    struct RecordingNotifier {
        messages: Mutex<Vec<(Severity, String)>>,
    }

    impl RecordingNotifier {
        fn recorded(&self) -> Vec<(Severity, String)> {
            self.messages.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, severity: Severity, message: &str) {
            self.messages
                .lock()
                .unwrap()
                .push((severity, message.to_string()));
        }
    }

    fn label_of(node: &MenuNode) -> &str {
        match node {
            MenuNode::Standard { label, .. } => label,
            MenuNode::Checkbox { label, .. } => label,
            MenuNode::SubMenu { label, .. } => label,
            MenuNode::Separator => "<separator>",
        }
    }

    #[test]
    fn categories_render_sorted_before_settings_and_exit() {
        let mut doc = Document::default();
        doc.others.insert(
            "Dev".to_string(),
            vec![MenuEntry::new("X", ItemKind::Command)],
        );
        doc.others.insert(
            "Apps".to_string(),
            vec![MenuEntry::new("A", ItemKind::WindowsApps)],
        );

        let resolver = FakeResolver::ok();
        let notifier = RecordingNotifier::default();
        let tree = MenuSynthesizer::new(&resolver, &notifier).build(&doc);

        let labels: Vec<&str> = tree.iter().map(label_of).collect();
        assert_eq!(labels, ["Apps", "Dev", "<separator>", "Settings", "Exit"]);
        assert!(matches!(
            &tree[0],
            MenuNode::SubMenu { enabled: true, children, .. } if children.len() == 1
        ));
        assert_eq!(tree.last(), Some(&MenuNode::leaf("Exit", MenuAction::Quit)));
    }

    #[test]
    fn invalid_entries_are_reported_and_do_not_harm_siblings() {
        let resolver = FakeResolver::ok();
        let notifier = RecordingNotifier::default();
        let synthesizer = MenuSynthesizer::new(&resolver, &notifier);

        let entries = vec![
            MenuEntry {
                name: String::new(),
                kind: "Command".to_string(),
                ..Default::default()
            },
            MenuEntry {
                name: "Odd".to_string(),
                kind: "Gizmo".to_string(),
                ..Default::default()
            },
            MenuEntry::new("Good", ItemKind::Command),
        ];
        let infos = synthesizer.resolve_entries(&entries);

        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].name, "Good");
        let messages = notifier.recorded();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], (Severity::Error, "Invalid Item: ".to_string()));
        assert_eq!(
            messages[1],
            (
                Severity::Error,
                "Invalid Item Type: Gizmo, from name: Odd".to_string()
            )
        );
    }

    #[test]
    fn survivors_keep_input_order_when_some_fail() {
        let resolver = FakeResolver::failing_on(&["b"]);
        let notifier = RecordingNotifier::default();
        let synthesizer = MenuSynthesizer::new(&resolver, &notifier);

        let entries = vec![
            MenuEntry::new("a", ItemKind::Command),
            MenuEntry::new("b", ItemKind::Command),
            MenuEntry::new("c", ItemKind::Command),
        ];
        let names: Vec<String> = synthesizer
            .resolve_entries(&entries)
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, ["a", "c"]);
        // Resolution failures are not user-notified.
        assert!(notifier.recorded().is_empty());
    }

    #[test]
    fn empty_document_yields_single_disabled_placeholder() {
        let resolver = FakeResolver::ok();
        let notifier = RecordingNotifier::default();
        let tree = MenuSynthesizer::new(&resolver, &notifier).build(&Document::default());

        assert_eq!(tree[0], MenuNode::disabled("Empty"));
        let submenu_count = tree
            .iter()
            .filter(|n| matches!(n, MenuNode::SubMenu { label, .. } if label != "Settings"))
            .count();
        assert_eq!(submenu_count, 0);
        let labels: Vec<&str> = tree.iter().map(label_of).collect();
        assert_eq!(labels, ["Empty", "<separator>", "Settings", "Exit"]);
    }

    #[test]
    fn fully_failed_category_is_disabled_at_its_sorted_position() {
        let mut doc = Document::default();
        doc.others.insert(
            "Apps".to_string(),
            vec![MenuEntry::new("ok", ItemKind::Command)],
        );
        doc.others.insert(
            "Dev".to_string(),
            vec![MenuEntry::new("broken", ItemKind::Command)],
        );

        let resolver = FakeResolver::failing_on(&["broken"]);
        let notifier = RecordingNotifier::default();
        let tree = MenuSynthesizer::new(&resolver, &notifier).build(&doc);

        assert!(matches!(
            &tree[0],
            MenuNode::SubMenu { label, enabled: true, .. } if label == "Apps"
        ));
        assert!(matches!(
            &tree[1],
            MenuNode::SubMenu { label, enabled: false, children } if label == "Dev" && children.is_empty()
        ));
    }

    #[test]
    fn fully_failed_flat_section_is_omitted_without_placeholder() {
        let mut doc = Document::default();
        doc.others.insert(
            "Apps".to_string(),
            vec![MenuEntry::new("ok", ItemKind::Command)],
        );
        doc.no_menu = vec![MenuEntry::new("broken", ItemKind::Command)];

        let resolver = FakeResolver::failing_on(&["broken"]);
        let notifier = RecordingNotifier::default();
        let tree = MenuSynthesizer::new(&resolver, &notifier).build(&doc);

        let labels: Vec<&str> = tree.iter().map(label_of).collect();
        // The flat section's separator renders, its items do not, and no
        // "Empty" placeholder appears at the flat level.
        assert_eq!(
            labels,
            ["Apps", "<separator>", "<separator>", "Settings", "Exit"]
        );
    }

    #[test]
    fn rebuilding_without_changes_is_idempotent() {
        let mut doc = Document::default();
        doc.no_menu = vec![MenuEntry::new("Top", ItemKind::Command)];
        doc.others.insert(
            "Tools".to_string(),
            vec![
                MenuEntry::new("m", ItemKind::Command),
                MenuEntry::new("z", ItemKind::Command),
            ],
        );

        let resolver = FakeResolver::ok();
        let notifier = RecordingNotifier::default();
        let synthesizer = MenuSynthesizer::new(&resolver, &notifier);
        assert_eq!(synthesizer.build(&doc), synthesizer.build(&doc));
    }

    #[test]
    fn each_leaf_captures_its_own_command() {
        let mut doc = Document::default();
        doc.no_menu = vec![
            MenuEntry::new("first", ItemKind::Command),
            MenuEntry::new("second", ItemKind::Command),
        ];

        let resolver = FakeResolver::ok();
        let notifier = RecordingNotifier::default();
        let tree = MenuSynthesizer::new(&resolver, &notifier).build(&doc);

        let execs: Vec<&str> = tree
            .iter()
            .filter_map(|n| match n {
                MenuNode::Standard {
                    action: MenuAction::Launch(info),
                    ..
                } => Some(info.exec.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(execs, ["run first", "run second"]);
    }

    #[test]
    fn settings_checkbox_reflects_the_document_flag() {
        let resolver = FakeResolver::ok();
        let notifier = RecordingNotifier::default();
        let synthesizer = MenuSynthesizer::new(&resolver, &notifier);

        let mut doc = Document::default();
        for expected in [false, true] {
            doc.enable_logs = expected;
            let tree = synthesizer.build(&doc);
            let settings = tree
                .iter()
                .find(|n| matches!(n, MenuNode::SubMenu { label, .. } if label == "Settings"))
                .unwrap();
            let MenuNode::SubMenu { children, .. } = settings else {
                unreachable!()
            };
            let checked = children.iter().find_map(|n| match n {
                MenuNode::Checkbox { id, checked, .. } if id == ENABLE_LOGS_ID => Some(*checked),
                _ => None,
            });
            assert_eq!(checked, Some(expected));
        }
    }

    #[test]
    fn about_leaves_are_disabled() {
        let resolver = FakeResolver::ok();
        let notifier = RecordingNotifier::default();
        let tree = MenuSynthesizer::new(&resolver, &notifier).build(&Document::default());

        let MenuNode::SubMenu { children, .. } = tree
            .iter()
            .find(|n| matches!(n, MenuNode::SubMenu { label, .. } if label == "Settings"))
            .unwrap()
        else {
            unreachable!()
        };
        let MenuNode::SubMenu {
            children: about, ..
        } = children
            .iter()
            .find(|n| matches!(n, MenuNode::SubMenu { label, .. } if label == "About"))
            .unwrap()
        else {
            unreachable!()
        };
        assert_eq!(about.len(), 3);
        assert!(about.iter().all(|n| matches!(
            n,
            MenuNode::Standard {
                enabled: false,
                action: MenuAction::None,
                ..
            }
        )));
    }
}
