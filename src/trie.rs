use std::collections::BTreeMap;

use tracing::debug;

use crate::contact::Contact;

/// A node in the contact trie
#[derive(Debug, Default)]
struct TrieNode {
    // Whether some contact's name ends at this node
    is_terminal: bool,
    // Contacts whose lowercased name spells the path to this node, in insertion order
    contacts: Vec<Contact>,
    // The children of this node, keyed by the character. Ordered so enumeration is stable.
    children: BTreeMap<char, TrieNode>,
}

impl TrieNode {
    fn new() -> Self {
        TrieNode::default()
    }

    /// Drops every contact whose name folds to `key`, clearing the terminal flag when none remain.
    fn remove_contacts(&mut self, key: &str) {
        self.contacts.retain(|c| c.name().to_lowercase() != key);
        if self.contacts.is_empty() {
            self.is_terminal = false;
        }
    }

    fn count(&self) -> usize {
        1 + self.children.values().map(TrieNode::count).sum::<usize>()
    }
}

/// Result of [`ContactTrie::delete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// Case-insensitive prefix index over contact names.
#[derive(Debug, Default)]
pub struct ContactTrie {
    root: TrieNode,
    len: usize,
}

impl ContactTrie {
    /// Creates a new, empty index
    pub fn new() -> Self {
        ContactTrie::default()
    }

    /// Inserts a contact under the lowercased `name`. Duplicate names are kept side by side.
    pub fn insert(&mut self, name: &str, phone: &str, email: &str) {
        let key = name.to_lowercase();
        let mut current_node = &mut self.root;
        for c in key.chars() {
            current_node = current_node.children.entry(c).or_insert_with(TrieNode::new);
        }
        current_node.is_terminal = true;
        current_node.contacts.push(Contact::new(name, phone, email));
        self.len += 1;
        debug!(
            key = key.as_str(),
            contacts_at_key = current_node.contacts.len(),
            "inserted contact"
        );
    }

    /// Returns every contact whose name starts with `prefix`, ignoring case.
    ///
    /// Results are in pre-order: contacts stored at a node come before those of its
    /// children, and children are visited in character order. An empty prefix returns
    /// the whole directory.
    pub fn search(&self, prefix: &str) -> Vec<&Contact> {
        let key = prefix.to_lowercase();
        let mut current_node = &self.root;
        let mut result = Vec::new();

        for c in key.chars() {
            if let Some(next_node) = current_node.children.get(&c) {
                current_node = next_node;
            } else {
                debug!(prefix = key.as_str(), "prefix not present");
                return result;
            }
        }

        Self::dfs(current_node, &mut result);
        debug!(prefix = key.as_str(), found = result.len(), "search complete");
        result
    }

    /// Every stored contact, in the same order as `search("")`.
    pub fn list_all(&self) -> Vec<&Contact> {
        self.search("")
    }

    /// Removes all contacts named `name` (ignoring case).
    ///
    /// Only an exact path match counts; a name that is merely a prefix of stored
    /// names is reported as not found. When the emptied node has no children the
    /// edge from its parent is removed. Ancestors are left in place even if they
    /// end up holding nothing.
    pub fn delete(&mut self, name: &str) -> DeleteOutcome {
        let key = name.to_lowercase();
        let mut path: Vec<char> = key.chars().collect();
        let last = path.pop();

        let mut parent = &mut self.root;
        for c in &path {
            parent = match parent.children.get_mut(c) {
                Some(next_node) => next_node,
                None => {
                    debug!(key = key.as_str(), "delete: path missing");
                    return DeleteOutcome::NotFound;
                }
            };
        }

        let before = self.len;
        let removed = match last {
            // Empty name: the root itself holds the contacts and is never pruned.
            None => {
                if !parent.is_terminal {
                    debug!(key = key.as_str(), "delete: root is not terminal");
                    return DeleteOutcome::NotFound;
                }
                let held = parent.contacts.len();
                parent.remove_contacts(&key);
                held - parent.contacts.len()
            }
            Some(edge) => {
                let Some(node) = parent.children.get_mut(&edge) else {
                    debug!(key = key.as_str(), "delete: path missing");
                    return DeleteOutcome::NotFound;
                };
                if !node.is_terminal {
                    debug!(key = key.as_str(), "delete: node is not terminal");
                    return DeleteOutcome::NotFound;
                }
                let held = node.contacts.len();
                node.remove_contacts(&key);
                let removed = held - node.contacts.len();
                if node.children.is_empty() {
                    parent.children.remove(&edge);
                    debug!(key = key.as_str(), %edge, "pruned leaf");
                }
                removed
            }
        };

        self.len = before - removed;
        debug!(key = key.as_str(), removed, "deleted contacts");
        DeleteOutcome::Deleted
    }

    /// Number of stored contacts
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no contacts are stored
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nodes in the tree, root included.
    pub fn node_count(&self) -> usize {
        self.root.count()
    }

    /// Depth-first collection of every contact at or below `node`
    fn dfs<'a>(node: &'a TrieNode, result: &mut Vec<&'a Contact>) {
        if node.is_terminal {
            result.extend(node.contacts.iter());
        }

        for child in node.children.values() {
            Self::dfs(child, result);
        }
    }
}
