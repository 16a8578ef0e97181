//! Request Accumulator - byte-weiser HTTP-Request-Sammler
//!
//! Konsumiert den Request als einzelne Bytes und erkennt das Ende der
//! Header-Sektion (Leerzeile). Es wird bewusst kein HTTP geparst:
//! weder Methode noch Pfad noch Content-Length - nur die Leerzeile
//! zählt als Request-Grenze.

/// Ergebnis eines `feed()`-Aufrufs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedOutcome {
    /// Request-Grenze noch nicht gesehen
    Incomplete,
    /// Leerzeile gesehen - Header-Sektion komplett
    Complete,
}

/// Begrenzter Request-Puffer mit Schreib-Cursor
///
/// Kapazität ist Build-Zeit-Konstante. Läuft der Puffer voll, werden
/// weitere Bytes verworfen statt zu überlaufen - zu große Requests
/// werden abgeschnitten, nicht abgewiesen. Die Leerzeilen-Erkennung
/// läuft auch für verworfene Bytes weiter, damit die Request-Grenze
/// trotzdem gefunden wird.
pub struct RequestBuffer<const CAP: usize> {
    buf: [u8; CAP],
    len: usize,
    /// true solange die aktuelle Zeile noch leer ist
    /// (2-Zustands-Maschine: awaiting-blank-line / blank-line-seen)
    line_blank: bool,
}

impl<const CAP: usize> RequestBuffer<CAP> {
    pub const fn new() -> Self {
        Self {
            buf: [0u8; CAP],
            len: 0,
            line_blank: true,
        }
    }

    /// Setzt Puffer und Zeilen-Flag für einen neuen Request zurück
    pub fn reset(&mut self) {
        self.len = 0;
        self.line_blank = true;
    }

    /// Konsumiert ein Byte vom Client
    ///
    /// Flag-Logik: `\n` bei gesetztem Flag beendet den Request; `\n`
    /// setzt das Flag für die nächste Zeile; `\r` ist transparent;
    /// jedes andere Byte löscht das Flag.
    pub fn feed(&mut self, byte: u8) -> FeedOutcome {
        if self.len < CAP {
            self.buf[self.len] = byte;
            self.len += 1;
        }

        match byte {
            b'\n' if self.line_blank => return FeedOutcome::Complete,
            b'\n' => self.line_blank = true,
            b'\r' => {}
            _ => self.line_blank = false,
        }

        FeedOutcome::Incomplete
    }

    /// Bisher gesammelte Request-Bytes (ggf. abgeschnitten)
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn capacity(&self) -> usize {
        CAP
    }
}

impl<const CAP: usize> Default for RequestBuffer<CAP> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all<const CAP: usize>(buf: &mut RequestBuffer<CAP>, bytes: &[u8]) -> usize {
        let mut completions = 0;
        for &b in bytes {
            if buf.feed(b) == FeedOutcome::Complete {
                completions += 1;
            }
        }
        completions
    }

    #[test]
    fn test_complete_on_blank_line_crlf() {
        let mut buf = RequestBuffer::<128>::new();
        let completions = feed_all(&mut buf, b"GET / HTTP/1.1\r\nHost: x\r\n\r\n");
        assert_eq!(completions, 1);
        assert_eq!(buf.as_bytes(), b"GET / HTTP/1.1\r\nHost: x\r\n\r\n");
    }

    #[test]
    fn test_complete_on_blank_line_bare_lf() {
        // Auch nacktes \n\n ist eine Leerzeile
        let mut buf = RequestBuffer::<128>::new();
        assert_eq!(feed_all(&mut buf, b"GET / HTTP/1.1\nHost: x\n\n"), 1);
    }

    #[test]
    fn test_never_completes_without_blank_line() {
        let mut buf = RequestBuffer::<128>::new();
        assert_eq!(feed_all(&mut buf, b"GET / HTTP/1.1\r\nHost: x\r\nAccept: */*"), 0);
    }

    #[test]
    fn test_carriage_return_is_transparent() {
        // \r zwischen den beiden \n darf die Erkennung nicht stören
        let mut buf = RequestBuffer::<128>::new();
        assert_eq!(feed_all(&mut buf, b"GET /\r\n\r\n"), 1);
    }

    #[test]
    fn test_leading_blank_line_completes_immediately() {
        // Flag startet gesetzt: ein \n als allererstes Byte beendet
        let mut buf = RequestBuffer::<128>::new();
        assert_eq!(buf.feed(b'\n'), FeedOutcome::Complete);
    }

    #[test]
    fn test_truncation_caps_cursor_and_still_completes() {
        let mut buf = RequestBuffer::<8>::new();
        let completions = feed_all(&mut buf, b"GET /?freezer=1 HTTP/1.1\r\nHost: x\r\n\r\n");
        assert_eq!(completions, 1);
        assert_eq!(buf.len(), 8);
        assert_eq!(buf.as_bytes(), b"GET /?fr");
    }

    #[test]
    fn test_reset_rearms_flag_and_empties_buffer() {
        let mut buf = RequestBuffer::<64>::new();
        feed_all(&mut buf, b"GET /\r\n\r\n");
        buf.reset();
        assert!(buf.is_empty());
        assert_eq!(feed_all(&mut buf, b"POST /x\r\n\r\n"), 1);
        assert_eq!(buf.as_bytes(), b"POST /x\r\n\r\n");
    }

    #[test]
    fn test_chunking_independence() {
        // Byte-weise vs. am Stück muss identisch komplettieren -
        // feed() ist ohnehin byte-weise, hier geht es darum, dass der
        // Zustand über Aufrufe hinweg korrekt getragen wird.
        let request = b"GET /?updateData HTTP/1.1\r\nHost: chamber\r\n\r\n";
        let mut a = RequestBuffer::<128>::new();
        let mut b = RequestBuffer::<128>::new();
        let completions_a = feed_all(&mut a, request);
        let mut completions_b = 0;
        for chunk in request.chunks(7) {
            completions_b += feed_all(&mut b, chunk);
        }
        assert_eq!(completions_a, 1);
        assert_eq!(completions_b, 1);
        assert_eq!(a.as_bytes(), b.as_bytes());
    }
}
