//! Box-drawing structure dump for debugging tree shapes.

use std::fmt::Debug;

use super::link;
use super::node::ValueNode;

/// Renders the subtree under `root`, one node per line, left edges marked
/// `←` and right edges `→`.
pub(crate) fn render<T, N>(arena: &[N], root: Option<u32>, name: &str) -> String
where
    T: Debug,
    N: ValueNode<T>,
{
    match root {
        None => format!("{name} ∅"),
        Some(root) => {
            let mut out = String::from(name);
            render_node(arena, root, "", "└─", &mut out);
            out
        }
    }
}

fn render_node<T, N>(arena: &[N], node: u32, tab: &str, edge: &str, out: &mut String)
where
    T: Debug,
    N: ValueNode<T>,
{
    out.push('\n');
    out.push_str(tab);
    out.push_str(edge);
    out.push(' ');
    out.push_str(&format!("{:?}", arena[node as usize].value()));
    let deeper = format!("{tab}  ");
    if let Some(l) = link::get_l(arena, node) {
        render_node(arena, l, &deeper, "←", out);
    }
    if let Some(r) = link::get_r(arena, node) {
        render_node(arena, r, &deeper, "→", out);
    }
}
