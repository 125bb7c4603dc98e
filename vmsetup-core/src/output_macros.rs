//! Output macros for consistent terminal output across the vmsetup crates.
//!
//! Plain progress goes to stdout next to the banners; status lines
//! (success, warnings, errors) go to stderr so they stay visible when
//! stdout is redirected to a file.

#[macro_export]
macro_rules! vm_println {
    () => {
        println!();
    };
    ($($arg:tt)*) => {
        println!("{}", format!($($arg)*));
    }
}

#[macro_export]
macro_rules! vm_error {
    ($($arg:tt)*) => {
        eprintln!("{}", format!($($arg)*));
    }
}

#[macro_export]
macro_rules! vm_error_hint {
    ($($arg:tt)*) => {
        eprintln!("💡 {}", format!($($arg)*));
    };
}

#[macro_export]
macro_rules! vm_error_with_details {
    ($main:expr, $details:expr) => {
        eprintln!("❌ {}", $main);
        for detail in $details {
            eprintln!("   └─ {}", detail);
        }
    };
}

#[macro_export]
macro_rules! vm_success {
    ($($arg:tt)*) => {
        eprintln!("✓ {}", format!($($arg)*));
    };
}

#[macro_export]
macro_rules! vm_info {
    ($($arg:tt)*) => {
        eprintln!("ℹ {}", format!($($arg)*));
    };
}

#[macro_export]
macro_rules! vm_warning {
    ($($arg:tt)*) => {
        eprintln!("⚠ {}", format!($($arg)*));
    };
}

/// Banner framing every provisioning step.
pub mod banner {
    use std::io::{self, Write};

    use tracing::debug;

    pub const BANNER_WIDTH: usize = 79;

    /// Centre `text` in `width` columns.
    ///
    /// When the total padding is odd and `width` is odd the extra space goes
    /// on the left, so banners line up with the ones the old shell tooling
    /// printed. Text wider than `width` is returned unchanged.
    pub fn center(text: &str, width: usize) -> String {
        let len = text.chars().count();
        if len >= width {
            return text.to_string();
        }
        let margin = width - len;
        let left = margin / 2 + (margin & width & 1);
        let right = margin - left;
        format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
    }

    /// Render the full banner: rule, centred text, rule, blank line.
    pub fn format_banner(text: &str) -> String {
        let rule = "=".repeat(BANNER_WIDTH);
        format!("{rule}\n{}\n{rule}\n\n", center(text, BANNER_WIDTH))
    }

    /// Print the banner to stdout and flush so it precedes any child output.
    ///
    /// A closed or broken stdout does not stop provisioning; the failure is
    /// only logged.
    pub fn print_banner(text: &str) {
        if let Err(e) = write_banner(&mut io::stdout().lock(), text) {
            debug!(error = %e, "could not write banner to stdout");
        }
    }

    /// Write the banner to `out` and flush it.
    pub fn write_banner<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
        out.write_all(format_banner(text).as_bytes())?;
        out.flush()
    }

}
