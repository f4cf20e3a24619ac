pub mod achievements;
pub mod check;
pub mod clear;
pub mod play;

use std::io::{self, BufRead, Write};
use std::path::Path;

use sb_content::ContentStore;

/// Load a content file, mapping failures to a CLI message.
fn load_content(path: &Path) -> Result<ContentStore, String> {
    ContentStore::from_path(path).map_err(|e| format!("failed to load content: {e}"))
}

/// Line-oriented prompt over any reader.
struct Input<R> {
    reader: R,
    line: String,
}

impl<R: BufRead> Input<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }

    /// Print `prompt` and read one trimmed line. `None` on EOF.
    fn next(&mut self, prompt: &str) -> Result<Option<String>, String> {
        print!("{prompt}");
        io::stdout().flush().map_err(|e| e.to_string())?;

        self.line.clear();
        match self.reader.read_line(&mut self.line) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(self.line.trim().to_string())),
            Err(e) => Err(e.to_string()),
        }
    }
}
