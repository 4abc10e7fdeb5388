//! Nicklist tree owned by a buffer.

/// A nick entry inside a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nick {
    pub name: String,
    pub color: Option<String>,
    pub prefix: Option<char>,
    pub visible: bool,
}

/// A group of nicks; groups nest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NickGroup {
    pub name: String,
    pub color: Option<String>,
    pub visible: bool,
    pub children: Vec<NickGroup>,
    pub nicks: Vec<Nick>,
}

impl NickGroup {
    fn new(name: &str, color: Option<&str>, visible: bool) -> Self {
        Self {
            name: name.to_string(),
            color: color.map(str::to_string),
            visible,
            children: Vec::new(),
            nicks: Vec::new(),
        }
    }

    fn find_group_mut(&mut self, name: &str) -> Option<&mut NickGroup> {
        if self.name == name {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|child| child.find_group_mut(name))
    }

    fn find_nick(&self, name: &str, case_sensitive: bool) -> Option<&Nick> {
        self.nicks
            .iter()
            .find(|nick| names_equal(&nick.name, name, case_sensitive))
            .or_else(|| {
                self.children
                    .iter()
                    .find_map(|child| child.find_nick(name, case_sensitive))
            })
    }

    fn remove_nick(&mut self, name: &str, case_sensitive: bool) -> bool {
        if let Some(pos) = self
            .nicks
            .iter()
            .position(|nick| names_equal(&nick.name, name, case_sensitive))
        {
            self.nicks.remove(pos);
            return true;
        }
        self.children
            .iter_mut()
            .any(|child| child.remove_nick(name, case_sensitive))
    }

    fn visible_count(&self, display_groups: bool) -> usize {
        let nicks = self.nicks.iter().filter(|nick| nick.visible).count();
        let groups: usize = self
            .children
            .iter()
            .map(|child| {
                let own = usize::from(display_groups && child.visible);
                own + child.visible_count(display_groups)
            })
            .sum();
        nicks + groups
    }

    fn max_length(&self) -> usize {
        let nicks = self
            .nicks
            .iter()
            .map(|nick| nick.name.chars().count() + usize::from(nick.prefix.is_some()))
            .max()
            .unwrap_or(0);
        self.children
            .iter()
            .map(|child| child.name.chars().count().max(child.max_length()))
            .fold(nicks, usize::max)
    }
}

fn names_equal(a: &str, b: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        a == b
    } else {
        a.eq_ignore_ascii_case(b)
    }
}

/// The nicklist of one buffer: a tree rooted at a group named `root`.
#[derive(Debug)]
pub struct Nicklist {
    root: Option<NickGroup>,
    pub(crate) display: bool,
    pub(crate) case_sensitive: bool,
    pub(crate) display_groups: bool,
    max_length: usize,
    visible_count: usize,
}

impl Default for Nicklist {
    fn default() -> Self {
        Self::new()
    }
}

impl Nicklist {
    pub const ROOT: &'static str = "root";

    pub fn new() -> Self {
        Self {
            root: Some(NickGroup::new(Self::ROOT, None, false)),
            display: false,
            case_sensitive: false,
            display_groups: true,
            max_length: 0,
            visible_count: 0,
        }
    }

    pub fn root(&self) -> Option<&NickGroup> {
        self.root.as_ref()
    }

    pub fn is_displayed(&self) -> bool {
        self.display
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn display_groups(&self) -> bool {
        self.display_groups
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Add a group under `parent` (the root when `None`).
    ///
    /// Returns false if the parent does not exist or the group already does.
    pub fn add_group(
        &mut self,
        parent: Option<&str>,
        name: &str,
        color: Option<&str>,
        visible: bool,
    ) -> bool {
        let Some(root) = self.root.as_mut() else {
            return false;
        };
        if root.find_group_mut(name).is_some() {
            return false;
        }
        let Some(parent) = root.find_group_mut(parent.unwrap_or(Self::ROOT)) else {
            return false;
        };
        parent.children.push(NickGroup::new(name, color, visible));
        self.recompute();
        true
    }

    /// Add a nick to `group` (the root when `None`).
    pub fn add_nick(
        &mut self,
        group: Option<&str>,
        name: &str,
        color: Option<&str>,
        prefix: Option<char>,
        visible: bool,
    ) -> bool {
        if self.search_nick(name).is_some() {
            return false;
        }
        let Some(root) = self.root.as_mut() else {
            return false;
        };
        let Some(group) = root.find_group_mut(group.unwrap_or(Self::ROOT)) else {
            return false;
        };
        group.nicks.push(Nick {
            name: name.to_string(),
            color: color.map(str::to_string),
            prefix,
            visible,
        });
        self.recompute();
        true
    }

    pub fn search_nick(&self, name: &str) -> Option<&Nick> {
        self.root
            .as_ref()
            .and_then(|root| root.find_nick(name, self.case_sensitive))
    }

    pub fn remove_nick(&mut self, name: &str) -> bool {
        let case_sensitive = self.case_sensitive;
        let removed = self
            .root
            .as_mut()
            .is_some_and(|root| root.remove_nick(name, case_sensitive));
        if removed {
            self.recompute();
        }
        removed
    }

    /// Remove every group and nick below the root, keeping the root.
    pub fn remove_all(&mut self) {
        if let Some(root) = self.root.as_mut() {
            root.children.clear();
            root.nicks.clear();
        }
        self.recompute();
    }

    /// Drop the root group itself. Only done while closing the buffer.
    pub fn remove_root(&mut self) {
        self.remove_all();
        self.root = None;
    }

    /// Recompute cached counters after a flag or content change.
    pub fn recompute(&mut self) {
        let (visible, max) = match &self.root {
            Some(root) => (root.visible_count(self.display_groups), root.max_length()),
            None => (0, 0),
        };
        self.visible_count = visible;
        self.max_length = max;
    }
}
