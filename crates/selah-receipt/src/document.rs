//! Ticket document builder
//!
//! Provides a fluent API for building fixed-width ticket text.

/// Fixed-width ticket builder.
///
/// Accumulates lines at a configured character width, then paginates them
/// into a [`TicketDocument`].
///
/// Common widths:
/// - 58mm paper: 32 characters
/// - 80mm paper: 48 characters
pub struct TicketBuilder {
    lines: Vec<String>,
    width: usize,
}

impl TicketBuilder {
    /// Create a new builder with the specified paper width in characters.
    pub fn new(width: usize) -> Self {
        Self {
            lines: Vec::with_capacity(64),
            width,
        }
    }

    /// Get the configured paper width.
    pub fn width(&self) -> usize {
        self.width
    }

    // === Text Output ===

    /// Write a line of text.
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.lines.push(s.to_string());
        self
    }

    /// Write an empty line.
    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    // === Alignment ===

    /// Write a line centered within the paper width.
    pub fn center(&mut self, s: &str) -> &mut Self {
        let len = s.chars().count();
        if len >= self.width {
            return self.line(s);
        }
        let pad = (self.width - len) / 2;
        let centered = format!("{}{}", " ".repeat(pad), s);
        self.line(&centered)
    }

    /// Write left and right text on the same line.
    ///
    /// Left text is left-aligned, right text is right-aligned, with spaces
    /// filling the gap. Overlong pairs fall back to a single space gap.
    pub fn line_lr(&mut self, left: &str, right: &str) -> &mut Self {
        let lw = left.chars().count();
        let rw = right.chars().count();

        if lw + rw >= self.width {
            let joined = format!("{} {}", left, right);
            return self.line(&joined);
        }

        let gap = self.width - lw - rw;
        let joined = format!("{}{}{}", left, " ".repeat(gap), right);
        self.line(&joined)
    }

    // === Separators ===

    /// Write a line of '=' characters.
    pub fn sep_double(&mut self) -> &mut Self {
        let sep = "=".repeat(self.width);
        self.line(&sep)
    }

    /// Write a line of '-' characters.
    pub fn sep_single(&mut self) -> &mut Self {
        let sep = "-".repeat(self.width);
        self.line(&sep)
    }

    // === Output ===

    /// Number of accumulated lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Paginate the accumulated lines into a document.
    ///
    /// `page_height` is the number of lines per page; content overflowing a
    /// page continues on the next one, mirroring how the printed ticket
    /// breaks when the line-item table outgrows the paper.
    pub fn paginate(self, page_height: usize) -> TicketDocument {
        let page_height = page_height.max(1);

        let pages = self
            .lines
            .chunks(page_height)
            .map(|chunk| chunk.join("\n"))
            .collect::<Vec<_>>();

        TicketDocument {
            width: self.width,
            pages: if pages.is_empty() {
                vec![String::new()]
            } else {
                pages
            },
        }
    }
}

/// A paginated, ready-to-print ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketDocument {
    width: usize,
    pages: Vec<String>,
}

impl TicketDocument {
    /// Paper width in characters.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The pages, in order.
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Full document text with form-feed page breaks.
    pub fn text(&self) -> String {
        self.pages.join("\n\u{c}\n")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
