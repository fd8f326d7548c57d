use crate::container::Container;

/// Render a hexdump preview of data, one indented line per 16 bytes
pub fn hexdump_preview(data: &[u8], max_lines: usize, indent: &str) -> String {
    let mut out = String::new();

    for (line, chunk) in data.chunks(16).take(max_lines).enumerate() {
        out.push_str(&format!("{}  {:08x}  ", indent, line * 16));
        for i in 0..16 {
            match chunk.get(i) {
                Some(b) => out.push_str(&format!("{:02x} ", b)),
                None => out.push_str("   "),
            }
            if i == 7 {
                out.push(' ');
            }
        }

        out.push_str(" |");
        out.extend(chunk.iter().map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '.'
            }
        }));
        out.push_str("|\n");
    }

    if data.len() > max_lines * 16 {
        out.push_str(&format!(
            "{}  ... ({} more bytes)\n",
            indent,
            data.len() - max_lines * 16
        ));
    }

    out
}

/// Human-readable dump: `[header]`, `[blocks]` and `[filenames]` sections
pub fn dump_text(container: &Container) -> String {
    let mut out = String::new();

    out.push_str("[header]\nrsrc = ");
    out.push_str(&container.header().summary());
    out.push_str("\n\n[blocks]\n");
    for block in container.blocks() {
        out.push_str(&block.summary());
        out.push('\n');
    }
    out.push_str("\n[filenames]\n");
    out.push_str(&container.filenames().join("\n"));

    out
}
