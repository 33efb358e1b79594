use std::collections::HashMap;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::error::FsError;

pub const ROOT: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Directory,
    File,
}

#[derive(Debug, Clone)]
pub enum VfsNode {
    File {
        content: String,
        mtime: DateTime<Local>,
    },
    Directory {
        // insertion order is display order
        children: Vec<String>,
        mtime: DateTime<Local>,
    },
}

impl VfsNode {
    fn empty_dir() -> Self {
        VfsNode::Directory {
            children: Vec::new(),
            mtime: Local::now(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            VfsNode::File { .. } => NodeKind::File,
            VfsNode::Directory { .. } => NodeKind::Directory,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, VfsNode::Directory { .. })
    }

    pub fn mtime(&self) -> DateTime<Local> {
        match self {
            VfsNode::File { mtime, .. } | VfsNode::Directory { mtime, .. } => *mtime,
        }
    }

    /// Byte length for files, the classic 4096 for directories.
    pub fn size(&self) -> usize {
        match self {
            VfsNode::File { content, .. } => content.len(),
            VfsNode::Directory { .. } => 4096,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ListOptions {
    pub include_hidden: bool,
    pub long_format: bool,
}

/// Metadata only filled in for long listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryDetails {
    pub size: usize,
    pub modified: DateTime<Local>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirEntry {
    pub name: String,
    pub path: String,
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<EntryDetails>,
}

impl DirEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }
}

/// In-memory tree of directories and files keyed by absolute path.
///
/// Every non-root node's parent exists and is a directory, and each
/// directory's `children` lists exactly the nodes directly beneath it.
#[derive(Debug, Clone)]
pub struct VirtualFileSystem {
    nodes: HashMap<String, VfsNode>,
}

impl Default for VirtualFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualFileSystem {
    /// Empty filesystem holding only `/`.
    pub fn new() -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(ROOT.to_string(), VfsNode::empty_dir());
        Self { nodes }
    }

    /// Resolve `raw` against `cwd` into a normalized absolute path.
    ///
    /// `.` and empty segments are dropped and `..` pops one segment,
    /// clamping at `/`. The result never has a trailing slash except for
    /// the root itself.
    pub fn resolve(raw: &str, cwd: &str) -> String {
        if raw.starts_with('/') {
            normalize(raw)
        } else {
            normalize(&format!("{}/{}", cwd, raw))
        }
    }

    pub fn node(&self, path: &str) -> Option<&VfsNode> {
        self.nodes.get(path)
    }

    pub fn exists(&self, path: &str) -> bool {
        self.nodes.contains_key(path)
    }

    pub fn is_dir(&self, path: &str) -> bool {
        self.nodes.get(path).is_some_and(VfsNode::is_dir)
    }

    pub fn list(&self, path: &str, opts: ListOptions) -> Result<Vec<DirEntry>, FsError> {
        let children = match self.nodes.get(path) {
            Some(VfsNode::Directory { children, .. }) => children,
            Some(VfsNode::File { .. }) => return Err(FsError::NotDirectory(path.to_string())),
            None => return Err(FsError::NotFound(path.to_string())),
        };

        let mut entries = Vec::with_capacity(children.len());
        for name in children {
            if !opts.include_hidden && name.starts_with('.') {
                continue;
            }
            let child_path = join(path, name);
            // children and nodes are kept in sync by every mutation below
            let Some(node) = self.nodes.get(&child_path) else {
                continue;
            };
            entries.push(DirEntry {
                name: name.clone(),
                kind: node.kind(),
                details: opts.long_format.then(|| EntryDetails {
                    size: node.size(),
                    modified: node.mtime(),
                }),
                path: child_path,
            });
        }
        Ok(entries)
    }

    pub fn read(&self, path: &str) -> Result<&str, FsError> {
        match self.nodes.get(path) {
            Some(VfsNode::File { content, .. }) => Ok(content),
            Some(VfsNode::Directory { .. }) => Err(FsError::IsDirectory(path.to_string())),
            None => Err(FsError::NotFound(path.to_string())),
        }
    }

    pub fn create_dir(&mut self, path: &str) -> Result<(), FsError> {
        if self.nodes.contains_key(path) {
            return Err(FsError::AlreadyExists(path.to_string()));
        }
        self.insert(path, VfsNode::empty_dir())
    }

    /// `mkdir -p`: create every missing ancestor, accept existing directories.
    pub fn create_dir_all(&mut self, path: &str) -> Result<(), FsError> {
        let mut current = String::new();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            current.push('/');
            current.push_str(segment);
            match self.nodes.get(&current) {
                Some(VfsNode::Directory { .. }) => {}
                Some(VfsNode::File { .. }) if current.len() == path.trim_end_matches('/').len() => {
                    return Err(FsError::AlreadyExists(current))
                }
                Some(VfsNode::File { .. }) => return Err(FsError::NotDirectory(current)),
                None => self.insert(&current, VfsNode::empty_dir())?,
            }
        }
        Ok(())
    }

    /// Create a file, or refresh its mtime if it already exists.
    ///
    /// Re-creating an existing file leaves its content alone, like `touch`.
    pub fn create_file(&mut self, path: &str, content: &str) -> Result<(), FsError> {
        match self.nodes.get_mut(path) {
            Some(VfsNode::File { mtime, .. }) => {
                *mtime = Local::now();
                Ok(())
            }
            Some(VfsNode::Directory { .. }) => Err(FsError::IsDirectory(path.to_string())),
            None => self.insert(
                path,
                VfsNode::File {
                    content: content.to_string(),
                    mtime: Local::now(),
                },
            ),
        }
    }

    /// Refresh the mtime of any existing node, or create an empty file.
    pub fn touch(&mut self, path: &str) -> Result<(), FsError> {
        match self.nodes.get_mut(path) {
            Some(VfsNode::Directory { mtime, .. }) => {
                *mtime = Local::now();
                Ok(())
            }
            _ => self.create_file(path, ""),
        }
    }

    /// Create or overwrite a file's content.
    pub fn write_file(&mut self, path: &str, content: &str) -> Result<(), FsError> {
        match self.nodes.get_mut(path) {
            Some(VfsNode::File {
                content: existing,
                mtime,
            }) => {
                *existing = content.to_string();
                *mtime = Local::now();
                Ok(())
            }
            Some(VfsNode::Directory { .. }) => Err(FsError::IsDirectory(path.to_string())),
            None => self.insert(
                path,
                VfsNode::File {
                    content: content.to_string(),
                    mtime: Local::now(),
                },
            ),
        }
    }

    /// Remove a file. Directories are rejected, there is no recursive delete.
    pub fn remove(&mut self, path: &str) -> Result<(), FsError> {
        match self.nodes.get(path) {
            None => return Err(FsError::NotFound(path.to_string())),
            Some(VfsNode::Directory { .. }) => return Err(FsError::IsDirectory(path.to_string())),
            Some(VfsNode::File { .. }) => {}
        }
        let (parent, name) = split_path(path).ok_or_else(|| FsError::InvalidPath(path.to_string()))?;
        if let Some(VfsNode::Directory { children, mtime }) = self.nodes.get_mut(parent) {
            children.retain(|child| child != name);
            *mtime = Local::now();
        }
        self.nodes.remove(path);
        Ok(())
    }

    /// Validate a `cd` target and return it. Nothing is mutated here; the
    /// caller owns the working directory.
    pub fn change_directory(&self, path: &str) -> Result<String, FsError> {
        match self.nodes.get(path) {
            Some(VfsNode::Directory { .. }) => Ok(path.to_string()),
            Some(VfsNode::File { .. }) => Err(FsError::NotDirectory(path.to_string())),
            None => Err(FsError::NotFound(path.to_string())),
        }
    }

    // link a new node under its parent, checking the tree invariants
    fn insert(&mut self, path: &str, node: VfsNode) -> Result<(), FsError> {
        let (parent, name) = split_path(path).ok_or_else(|| FsError::InvalidPath(path.to_string()))?;
        match self.nodes.get_mut(parent) {
            Some(VfsNode::Directory { children, mtime }) => {
                children.push(name.to_string());
                *mtime = Local::now();
            }
            Some(VfsNode::File { .. }) => return Err(FsError::NotDirectory(parent.to_string())),
            None => return Err(FsError::NotFound(parent.to_string())),
        }
        self.nodes.insert(path.to_string(), node);
        Ok(())
    }
}

/// Join a directory path and a child name.
pub fn join(dir: &str, name: &str) -> String {
    if dir == ROOT {
        format!("/{}", name)
    } else {
        format!("{}/{}", dir, name)
    }
}

/// Split a normalized absolute path into (parent, name). `None` for the root.
pub fn split_path(path: &str) -> Option<(&str, &str)> {
    let idx = path.rfind('/')?;
    let name = &path[idx + 1..];
    if name.is_empty() {
        return None;
    }
    let parent = if idx == 0 { ROOT } else { &path[..idx] };
    Some((parent, name))
}

fn normalize(path: &str) -> String {
    let mut components: Vec<&str> = Vec::new();
    for component in path.split('/') {
        match component {
            "" | "." => continue,
            ".." => {
                // can't go above root
                components.pop();
            }
            comp => components.push(comp),
        }
    }
    if components.is_empty() {
        ROOT.to_string()
    } else {
        format!("/{}", components.join("/"))
    }
}
