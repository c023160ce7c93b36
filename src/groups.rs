// Group Directory
//
// Open groups anyone can discover and join. Only affects the `groups_list`
// broadcasts; message delivery never consults it.

#[derive(Debug, Clone)]
pub struct GroupDirectory {
    names: Vec<String>,
}

impl GroupDirectory {
    /// A directory holding just `default_group`.
    pub fn seeded(default_group: impl Into<String>) -> Self {
        let name: String = default_group.into();
        let mut directory = Self { names: Vec::new() };
        directory.create(&name);
        directory
    }

    /// Add `name` unless it is already listed. Returns whether it was new.
    pub fn create(&mut self, name: &str) -> bool {
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.names.push(name.to_owned());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Group names in creation order.
    pub fn snapshot(&self) -> Vec<String> {
        self.names.clone()
    }
}
