use crate::AVLGTree;
use crate::node::{Node, Side};
use core::fmt::{self, Write};
use core::ptr;

/// Renders an [`AVLGTree`] in [graphviz format](https://graphviz.org/doc/info/lang.html).
///
/// Every node is labelled with its key, cached height and balance factor.
pub struct Dot<'a, K> {
    pub(crate) tree: &'a AVLGTree<K>,
}

impl<K> Dot<'_, K>
where
    K: fmt::Debug,
{
    fn node_fmt(f: &mut fmt::Formatter<'_>, node: &Node<K>) -> fmt::Result {
        let id = ptr::from_ref(node).addr();

        writeln!(
            f,
            r#"    {id} [label="{key} height = {height}, balance = {balance}"];"#,
            key = Escaped(&node.key),
            height = node.height,
            balance = node.balance(),
        )?;

        for side in [Side::Left, Side::Right] {
            if let Some(child) = node.child(side).as_deref() {
                writeln!(
                    f,
                    r#"    {id} -> {} [label="{side}"];"#,
                    ptr::from_ref(child).addr()
                )?;
                Self::node_fmt(f, child)?;
            }
        }

        Ok(())
    }
}

impl<K> fmt::Display for Dot<'_, K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("digraph {\n")?;

        if let Some(root) = self.tree.root.as_deref() {
            Self::node_fmt(f, root)?;
        }

        f.write_str("}\n")
    }
}

impl<K> fmt::Debug for Dot<'_, K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Debug-formats a key with `"` and `\` escaped so it fits into a quoted DOT label.
struct Escaped<'a, K>(&'a K);

impl<K: fmt::Debug> fmt::Display for Escaped<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Escaper<'a, 'b>(&'a mut fmt::Formatter<'b>);

        impl Write for Escaper<'_, '_> {
            fn write_str(&mut self, s: &str) -> fmt::Result {
                for c in s.chars() {
                    if matches!(c, '"' | '\\') {
                        self.0.write_char('\\')?;
                    }
                    self.0.write_char(c)?;
                }
                Ok(())
            }
        }

        write!(Escaper(f), "{:?}", self.0)
    }
}
