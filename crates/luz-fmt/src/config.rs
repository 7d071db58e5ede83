// SPDX-License-Identifier: (MIT OR Apache-2.0)

/// Formatter configuration. The language server fills this from the
/// client's `tabSize`/`insertSpaces` options.
pub struct FormatConfig {
    pub indent_width: usize,
    pub insert_spaces: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent_width: 4,
            insert_spaces: true,
        }
    }
}
