//! Static screens drawn outside the map view.

use crate::types::{Fore, Style, Viewport, CONTROL_COUNT};

/// Screen asking the user to resize until the whole viewport fits.
///
/// One line per viewport row, each as wide as a rendered map row, so the
/// prompt covers exactly the area the map will use. The last line carries
/// the instruction.
pub fn sizing_prompt(viewport: Viewport) -> Vec<String> {
    let width = viewport.columns();
    let height = usize::from(viewport.height);
    let message = "resize until this box fits, then press any key";

    let mut lines = Vec::with_capacity(height);
    for row in 0..height {
        let line = if row + 1 == height {
            let text: String = message.chars().take(width).collect();
            format!("{:<width$}", text)
        } else if row == 0 {
            "+".repeat(width)
        } else {
            format!("+{}+", " ".repeat(width.saturating_sub(2)))
        };
        lines.push(line);
    }
    lines
}

fn key_cap(key: char) -> String {
    format!(
        "[{}{}{}{}]",
        Style::Bright.code(),
        Fore::Yellow.code(),
        key,
        Style::ResetAll.code()
    )
}

/// Control legend for a forward/left/backward/right/interact scheme.
pub fn legend(keys: [char; CONTROL_COUNT], quit: char, help: char) -> Vec<String> {
    let [forward, left, backward, right, interact] = keys;
    vec![
        String::new(),
        format!("      {}", key_cap(forward)),
        format!("   {}{}{}   move", key_cap(left), key_cap(backward), key_cap(right)),
        String::new(),
        format!("   {} interact", key_cap(interact)),
        format!("   {} help", key_cap(help)),
        format!("   {} quit", key_cap(quit)),
        String::new(),
        "   press any key to continue".to_string(),
    ]
}
