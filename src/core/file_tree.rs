use log::debug;

// Tree node representation of the selected files; children keep insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    Directory {
        name: String,
        children: Vec<TreeNode>,
    },
    File {
        name: String,
    },
}

impl TreeNode {
    fn new_directory(name: String) -> Self {
        TreeNode::Directory {
            name,
            children: Vec::new(),
        }
    }

    fn new_file(name: String) -> Self {
        TreeNode::File { name }
    }

    pub fn name(&self) -> &str {
        match self {
            TreeNode::Directory { name, .. } => name,
            TreeNode::File { name } => name,
        }
    }

    pub fn children(&self) -> &[TreeNode] {
        match self {
            TreeNode::Directory { children, .. } => children,
            TreeNode::File { .. } => &[],
        }
    }

    /// Builds the hierarchy for `/`-separated relative paths.
    pub fn from_paths<S: AsRef<str>>(paths: &[S]) -> Self {
        let mut root = TreeNode::new_directory(String::new());
        for path in paths {
            root.add_path(path.as_ref());
        }
        root
    }

    fn add_path(&mut self, path: &str) {
        let components: Vec<&str> = path.split('/').filter(|c| !c.is_empty()).collect();
        let Some((file_name, dirs)) = components.split_last() else {
            return;
        };

        let mut current = self;
        for dir_name in dirs {
            let TreeNode::Directory { children, .. } = current else {
                return;
            };

            let dir_pos = children.iter().position(|child| {
                matches!(child, TreeNode::Directory { name, .. } if name == dir_name)
            });

            let idx = match dir_pos {
                Some(pos) => pos,
                None => {
                    children.push(TreeNode::new_directory(dir_name.to_string()));
                    children.len() - 1
                }
            };
            current = &mut children[idx];
        }

        if let TreeNode::Directory { children, .. } = current {
            if children.iter().any(|child| child.name() == *file_name) {
                debug!("Skipping duplicate tree entry: {}", path);
                return;
            }
            children.push(TreeNode::new_file(file_name.to_string()));
        }
    }

    /// Renders the children of this node as an ASCII tree.
    pub fn render(&self) -> String {
        let mut output = String::new();
        render_children(self.children(), "", &mut output);
        output
    }
}

fn render_children(children: &[TreeNode], prefix: &str, output: &mut String) {
    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;

        output.push_str(prefix);
        output.push_str(if is_last { "└── " } else { "├── " });
        output.push_str(child.name());
        output.push('\n');

        if let TreeNode::Directory { children, .. } = child {
            let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
            render_children(children, &child_prefix, output);
        }
    }
}

/// Renders the file tree for the walker's output, preserving its order.
pub fn build_tree(files: &[String]) -> String {
    debug!("Building file tree from {} paths", files.len());
    TreeNode::from_paths(files).render()
}
