//! Tree rendering for cube hierarchies

use console::Style;

/// A node in a rendered tree
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub name: String,
    pub node_type: NodeType,
    pub children: Vec<TreeNode>,
    /// Key/value lines shown under the node, in insertion order
    pub metadata: Vec<(String, String)>,
}

/// Kinds of nodes in a cube tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Model,
    Cube,
    LockedCube,
}

/// Options for tree rendering
#[derive(Debug, Clone, Default)]
pub struct TreeOptions {
    pub max_depth: Option<usize>,
    pub no_color: bool,
    pub show_metadata: bool,
}

impl TreeNode {
    pub fn new(name: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            name: name.into(),
            node_type,
            children: Vec::new(),
            metadata: Vec::new(),
        }
    }

    /// Add a child node
    pub fn add_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    /// Add a metadata line
    pub fn with_metadata(mut self, key: &str, value: impl Into<String>) -> Self {
        self.metadata.push((key.to_string(), value.into()));
        self
    }
}

impl NodeType {
    pub fn icon(self) -> &'static str {
        match self {
            NodeType::Model => "◆",
            NodeType::Cube => "■",
            NodeType::LockedCube => "🔒",
        }
    }

    pub fn style(self, no_color: bool) -> Style {
        if no_color {
            return Style::new();
        }
        match self {
            NodeType::Model => Style::new().bold().cyan(),
            NodeType::Cube => Style::new().green(),
            NodeType::LockedCube => Style::new().yellow(),
        }
    }
}

/// Render a tree to a string
pub fn render_tree(root: &TreeNode, options: &TreeOptions) -> String {
    let mut output = String::new();
    render_node(root, &mut output, "", true, 0, options);
    output
}

fn render_node(
    node: &TreeNode,
    output: &mut String,
    prefix: &str,
    is_last: bool,
    depth: usize,
    options: &TreeOptions,
) {
    if let Some(max_depth) = options.max_depth
        && depth > max_depth
    {
        return;
    }

    let connector = match (depth, is_last) {
        (0, _) => "",
        (_, true) => "└── ",
        (_, false) => "├── ",
    };
    output.push_str(&format!(
        "{prefix}{connector}{} {}\n",
        node.node_type.icon(),
        node.node_type.style(options.no_color).apply_to(&node.name)
    ));

    let child_prefix = match (depth, is_last) {
        (0, _) => String::new(),
        (_, true) => format!("{prefix}    "),
        (_, false) => format!("{prefix}│   "),
    };

    if options.show_metadata {
        let key_style = if options.no_color {
            Style::new()
        } else {
            Style::new().dim()
        };
        for (key, value) in &node.metadata {
            output.push_str(&format!(
                "{child_prefix}    {}: {value}\n",
                key_style.apply_to(key)
            ));
        }
    }

    for (i, child) in node.children.iter().enumerate() {
        let is_last_child = i + 1 == node.children.len();
        render_node(child, output, &child_prefix, is_last_child, depth + 1, options);
    }
}
