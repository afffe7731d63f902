//! Menu structure and navigation
//!
//! Menus are named lists of items kept sorted by their `order`. An item
//! either opens another menu or carries an action id for the caller.

use std::collections::HashMap;

/// Name of the menu shown when the menu is first opened
pub const MAIN_MENU: &str = "main";
/// Submenu listing the playable levels
pub const LEVELS_MENU: &str = "levels";

/// Action attached to a menu item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuItemId {
    /// Go back to the level in progress
    Resume,
    /// Opens the level list
    Play,
    Level(usize),
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub text: String,
    /// Position within its menu, lowest first
    pub order: i32,
    /// Menu opened when this item is selected
    pub sub_menu: Option<String>,
}

impl MenuItem {
    pub fn new(id: MenuItemId, text: impl Into<String>, order: i32) -> Self {
        Self {
            id,
            text: text.into(),
            order,
            sub_menu: None,
        }
    }

    pub fn with_sub_menu(mut self, menu: impl Into<String>) -> Self {
        self.sub_menu = Some(menu.into());
        self
    }
}

/// Result of selecting the highlighted item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The named submenu is now current
    Submenu(String),
    Item(MenuItemId),
}

#[derive(Debug, Clone)]
pub struct Menu {
    menus: HashMap<String, Vec<MenuItem>>,
    current: String,
    /// Menus to return to, innermost last
    parents: Vec<String>,
    highlighted: usize,
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}

impl Menu {
    pub fn new() -> Self {
        Self {
            menus: HashMap::new(),
            current: MAIN_MENU.to_string(),
            parents: Vec::new(),
            highlighted: 0,
        }
    }

    /// Add an item to `menu_name`, replacing any item with the same order
    pub fn add_menu_item(&mut self, menu_name: &str, item: MenuItem) {
        let items = self.menus.entry(menu_name.to_string()).or_default();
        match items.binary_search_by_key(&item.order, |i| i.order) {
            Ok(pos) => items[pos] = item,
            Err(pos) => items.insert(pos, item),
        }
    }

    /// Remove every item from `menu_name`
    pub fn clear_menu(&mut self, menu_name: &str) {
        self.menus.remove(menu_name);
        if self.current == menu_name {
            self.highlighted = 0;
        }
    }

    /// Items of `menu_name` in display order
    pub fn items(&self, menu_name: &str) -> &[MenuItem] {
        self.menus.get(menu_name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn current_items(&self) -> &[MenuItem] {
        self.items(&self.current)
    }

    pub fn current_menu_name(&self) -> &str {
        &self.current
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn highlight_next(&mut self) {
        if self.highlighted + 1 < self.current_items().len() {
            self.highlighted += 1;
        }
    }

    pub fn highlight_previous(&mut self) {
        self.highlighted = self.highlighted.saturating_sub(1);
    }

    /// Act on the highlighted item. Items with a submenu switch to it.
    pub fn select_current(&mut self) -> Option<Selection> {
        let item = self.current_items().get(self.highlighted)?.clone();
        match item.sub_menu {
            Some(sub_menu) => {
                let parent = std::mem::replace(&mut self.current, sub_menu.clone());
                self.parents.push(parent);
                self.highlighted = 0;
                Some(Selection::Submenu(sub_menu))
            }
            None => Some(Selection::Item(item.id)),
        }
    }

    /// Return to the parent menu. False when already at the top.
    pub fn back(&mut self) -> bool {
        match self.parents.pop() {
            Some(parent) => {
                self.current = parent;
                self.highlighted = 0;
                true
            }
            None => false,
        }
    }

    /// Go back to the main menu with the first item highlighted
    pub fn reset(&mut self) {
        self.current = MAIN_MENU.to_string();
        self.parents.clear();
        self.highlighted = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> Menu {
        let mut menu = Menu::new();
        menu.add_menu_item(MAIN_MENU, MenuItem::new(MenuItemId::Quit, "Quit", 10));
        menu.add_menu_item(
            MAIN_MENU,
            MenuItem::new(MenuItemId::Play, "Play", 0).with_sub_menu(LEVELS_MENU),
        );
        menu.add_menu_item(MAIN_MENU, MenuItem::new(MenuItemId::Resume, "Resume", 5));
        for n in 0..3 {
            menu.add_menu_item(
                LEVELS_MENU,
                MenuItem::new(MenuItemId::Level(n), format!("Level {}", n), n as i32),
            );
        }
        menu
    }

    #[test]
    fn test_items_sorted_by_order() {
        let menu = menu();
        let texts: Vec<_> = menu.items(MAIN_MENU).iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["Play", "Resume", "Quit"]);
        assert!(menu.items("missing").is_empty());
    }

    #[test]
    fn test_same_order_replaces() {
        let mut menu = menu();
        menu.add_menu_item(MAIN_MENU, MenuItem::new(MenuItemId::Quit, "Exit game", 10));
        assert_eq!(menu.items(MAIN_MENU).len(), 3);
        assert_eq!(menu.items(MAIN_MENU)[2].text, "Exit game");
    }

    #[test]
    fn test_highlight_clamps_at_ends() {
        let mut menu = menu();
        menu.highlight_previous();
        assert_eq!(menu.highlighted(), 0);
        for _ in 0..10 {
            menu.highlight_next();
        }
        assert_eq!(menu.highlighted(), 2);
        assert_eq!(menu.select_current(), Some(Selection::Item(MenuItemId::Quit)));
    }

    #[test]
    fn test_submenu_and_back() {
        let mut menu = menu();
        assert_eq!(
            menu.select_current(),
            Some(Selection::Submenu(LEVELS_MENU.to_string()))
        );
        assert_eq!(menu.current_menu_name(), LEVELS_MENU);
        menu.highlight_next();
        assert_eq!(
            menu.select_current(),
            Some(Selection::Item(MenuItemId::Level(1)))
        );
        assert!(menu.back());
        assert_eq!(menu.current_menu_name(), MAIN_MENU);
        assert_eq!(menu.highlighted(), 0);
        assert!(!menu.back());
    }

    #[test]
    fn test_select_in_empty_menu() {
        let mut menu = Menu::new();
        assert_eq!(menu.select_current(), None);
    }
}
