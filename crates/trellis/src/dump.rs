use std::io::Write;

use termcolor::{Buffer, Color, ColorSpec, WriteColor};
use trellis_geom::Axis;

use crate::{
    NodeId,
    error::{Error, Result},
    world::Core,
};

/// Render a node subtree as indented text: class, state flags and geometry
/// for every node. This is a debug function.
pub fn dump(core: &Core, root: impl Into<NodeId>) -> Result<String> {
    let mut buffer = Buffer::ansi();
    dump_node(&mut buffer, core, root.into(), 0)?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// Like [`dump`], without color escapes.
pub fn dump_plain(core: &Core, root: impl Into<NodeId>) -> Result<String> {
    let mut buffer = Buffer::no_color();
    dump_node(&mut buffer, core, root.into(), 0)?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// Write one node and recurse into its children.
fn dump_node(buffer: &mut Buffer, core: &Core, node_id: NodeId, level: usize) -> Result<()> {
    let node = core.node(node_id).ok_or(Error::NodeNotFound(node_id))?;
    let indent = "  ".repeat(level);

    write!(buffer, "{indent}")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
    write!(buffer, "{}", node.widget().class())?;
    buffer.reset()?;

    let mut flags = Vec::new();
    if !node.enabled() {
        flags.push("disabled");
    }
    if !node.shown() {
        flags.push("hidden");
    }
    if node.notify() {
        flags.push("notify");
    }
    for axis in Axis::ALL {
        if node.stretch_flag(axis) {
            flags.push(match axis {
                Axis::Horizontal => "hstretch",
                Axis::Vertical => "vstretch",
            });
        }
    }
    if !flags.is_empty() {
        buffer.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        write!(buffer, " [{}]", flags.join(", "))?;
        buffer.reset()?;
    }

    let r = node.rect();
    writeln!(
        buffer,
        " ({}, {}) {}x{}",
        r.tl.x, r.tl.y, r.size.w, r.size.h
    )?;

    for child in node.children() {
        dump_node(buffer, core, *child, level + 1)?;
    }
    Ok(())
}
