//! Crash-dump style text output.

use std::fmt::Write as _;

use crate::buffer::{Buffer, BufferId};
use crate::directory::BufferDirectory;

const HEXA_ROW: usize = 16;

impl BufferDirectory {
    /// Describe every buffer, one text row per entry.
    pub fn log_dump(&self) -> Vec<String> {
        let mut rows = Vec::new();
        for buffer in self.registry().iter() {
            rows.push(String::new());
            rows.push(format!("[buffer {}]", buffer.id()));
            describe(buffer, self.config().dump.lines, &mut rows);
        }
        rows
    }

    /// Write [`BufferDirectory::log_dump`] through `tracing` at info level.
    pub fn print_log(&self) {
        for row in self.log_dump() {
            tracing::info!(target: "chatbuf::dump", "{row}");
        }
    }

    /// Lines of a buffer as hex and ASCII, sixteen bytes per row.
    pub fn dump_hexa(&self, id: BufferId) -> Vec<String> {
        let Some(buffer) = self.get(id) else {
            return Vec::new();
        };
        let mut rows = vec![format!("[buffer dump hexa ({id})]")];
        for (index, line) in buffer.lines().iter().enumerate() {
            let num = index + 1;
            rows.push(String::new());
            rows.push(format!("  line {num}: {}", line.message));
            rows.push(String::new());
            rows.push(format!("  raw data for line {num} (with color codes):"));
            for chunk in line.message.as_bytes().chunks(HEXA_ROW) {
                rows.push(hexa_row(chunk));
            }
        }
        rows
    }
}

fn describe(buffer: &Buffer, line_count: usize, rows: &mut Vec<String>) {
    let input = buffer.input();
    let nicklist = buffer.nicklist();
    let fields: [(&str, String); 20] = [
        ("plugin", buffer.owner_name().to_string()),
        (
            "plugin_name_for_upgrade",
            format!("{:?}", buffer.plugin_name_for_upgrade()),
        ),
        ("number", buffer.number().to_string()),
        ("name", buffer.name().to_string()),
        ("type", buffer.kind().as_str().to_string()),
        ("notify", buffer.notify().as_str().to_string()),
        ("num_displayed", buffer.num_displayed().to_string()),
        ("title", format!("{:?}", buffer.title())),
        ("lines_count", buffer.lines().len().to_string()),
        ("lines_hidden", buffer.lines().lines_hidden().to_string()),
        ("last_read_line", format!("{:?}", buffer.lines().last_read())),
        ("nicklist", nicklist.is_displayed().to_string()),
        ("nicklist_case_sensitive", nicklist.case_sensitive().to_string()),
        ("nicklist_display_groups", nicklist.display_groups().to_string()),
        ("input", buffer.input_enabled().to_string()),
        ("input_buffer", format!("'{}'", input.text())),
        ("input_buffer_alloc", input.alloc().to_string()),
        ("input_buffer_pos", input.pos().to_string()),
        ("history_count", buffer.history().len().to_string()),
        ("keys_count", buffer.keys().len().to_string()),
    ];
    for (label, value) in fields {
        rows.push(format!("  {:.<24}: {value}", format!("{label} ")));
    }

    for key in buffer.keys().iter() {
        rows.push(format!("  key '{}' => '{}'", key.key, key.command));
    }

    let lines = buffer.lines().last_n(line_count);
    rows.push(String::new());
    rows.push(format!("  => last {} lines:", lines.len()));
    if lines.is_empty() {
        rows.push("       (no line)".to_string());
    }
    let skipped = buffer.lines().len() - lines.len();
    for (index, line) in lines.iter().enumerate() {
        rows.push(format!(
            "       line {}: displayed:{}, highlight:{}, tags:'{}', str_time:'{}', prefix:'{}'",
            skipped + index + 1,
            line.displayed,
            line.highlight,
            line.tags_joined(),
            line.str_time,
            line.prefix.as_deref().unwrap_or(""),
        ));
        rows.push(format!("                 data: '{}'", line.message));
    }
}

fn hexa_row(bytes: &[u8]) -> String {
    let mut hexa = String::with_capacity(HEXA_ROW * 3);
    let mut ascii = String::with_capacity(HEXA_ROW * 2);
    for &byte in bytes {
        let _ = write!(hexa, "{byte:02X} ");
        let shown = if (32..=127).contains(&byte) {
            byte as char
        } else {
            '.'
        };
        ascii.push(shown);
        ascii.push(' ');
    }
    format!("    {hexa:<48}  {ascii}")
}
