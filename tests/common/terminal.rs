//! TUI testing utilities using Ratatui's TestBackend

use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

/// Create a test terminal with custom dimensions
pub fn create_test_terminal_sized(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("Failed to create test terminal")
}

/// Convert a buffer to a string, one line per row
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut output = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                output.push_str(cell.symbol());
            }
        }
        output.push('\n');
    }

    output
}

/// Check if the buffer contains a string anywhere
pub fn buffer_contains(buffer: &Buffer, text: &str) -> bool {
    buffer_to_string(buffer).contains(text)
}

/// Assert that the buffer contains `expected`, dumping it otherwise
pub fn assert_buffer_contains(buffer: &Buffer, expected: &str) {
    let actual = buffer_to_string(buffer);
    assert!(
        actual.contains(expected),
        "Buffer does not contain expected text.\nExpected: {}\nActual:\n{}",
        expected,
        actual
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    #[test]
    fn test_buffer_contains() {
        let mut terminal = create_test_terminal_sized(20, 2);
        terminal
            .draw(|f| f.render_widget(Paragraph::new("Hello"), f.area()))
            .unwrap();
        assert!(buffer_contains(terminal.backend().buffer(), "Hello"));
        assert!(!buffer_contains(terminal.backend().buffer(), "World"));
    }
}
