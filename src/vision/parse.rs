//! Parsing of tesseract's tab-delimited output
//!
//! Each TSV record has exactly 12 fields; the header line is skipped and
//! anything not matching the expected shape is dropped without error.

/// A single recognized token with its bounding rectangle.
///
/// Coordinates are relative to the cropped sub-image handed to tesseract;
/// the renderer offsets them back into full-frame space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Confidence score, 0-100
    pub confidence: i32,
    /// Recognized token
    pub text: String,
}

/// One full detection pass: ordered boxes plus the concatenated text.
///
/// A new pass replaces the previous set wholesale; boxes are never merged
/// or tracked across frames.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectionSet {
    pub boxes: Vec<DetectionBox>,
    /// All recognized tokens for this pass, space-joined
    pub text: String,
}

/// Field count of a well-formed tesseract TSV record
const RECORD_FIELDS: usize = 12;

/// Parse a raw TSV record stream into a detection set.
///
/// The first line is the column header and is always skipped.
pub fn parse_tsv(raw: &str) -> DetectionSet {
    let boxes: Vec<DetectionBox> = raw.lines().skip(1).filter_map(parse_record).collect();
    let text = boxes
        .iter()
        .map(|b| b.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    DetectionSet { boxes, text }
}

/// Parse one data record, or None if it is not a well-formed word record.
///
/// Fields 7-10 are `left, top, width, height`, field 11 the confidence
/// (tesseract 4+ emits fractions, truncated here like the original tool),
/// field 12 the token. Page/block/line rows carry an empty token and are
/// dropped along with everything else malformed.
fn parse_record(line: &str) -> Option<DetectionBox> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != RECORD_FIELDS {
        return None;
    }
    let x = fields[6].trim().parse().ok()?;
    let y = fields[7].trim().parse().ok()?;
    let width = fields[8].trim().parse().ok()?;
    let height = fields[9].trim().parse().ok()?;
    let confidence = fields[10].trim().parse::<f64>().ok()? as i32;
    let text = fields[11].trim();
    if text.is_empty() || confidence < 0 {
        return None;
    }
    Some(DetectionBox {
        x,
        y,
        width,
        height,
        confidence,
        text: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext";

    fn record(left: i32, top: i32, width: i32, height: i32, conf: &str, text: &str) -> String {
        format!("5\t1\t1\t1\t1\t1\t{left}\t{top}\t{width}\t{height}\t{conf}\t{text}")
    }

    #[test]
    fn well_formed_record_maps_to_one_box() {
        let raw = format!("{HEADER}\n{}", record(12, 34, 56, 78, "91", "hello"));
        let set = parse_tsv(&raw);
        assert_eq!(
            set.boxes,
            vec![DetectionBox {
                x: 12,
                y: 34,
                width: 56,
                height: 78,
                confidence: 91,
                text: "hello".to_string(),
            }]
        );
        assert_eq!(set.text, "hello");
    }

    #[test]
    fn header_line_is_skipped() {
        let set = parse_tsv(HEADER);
        assert!(set.boxes.is_empty());
        assert_eq!(set.text, "");
    }

    #[test]
    fn short_record_is_dropped() {
        let raw = format!("{HEADER}\n1\t2\t3\t4\t5");
        assert!(parse_tsv(&raw).boxes.is_empty());
    }

    #[test]
    fn long_record_is_dropped() {
        let raw = format!("{HEADER}\n{}\textra", record(1, 2, 3, 4, "50", "word"));
        assert!(parse_tsv(&raw).boxes.is_empty());
    }

    #[test]
    fn non_numeric_geometry_is_dropped() {
        let raw = format!("{HEADER}\n{}", record(1, 2, 3, 4, "50", "ok"))
            .replace("\t1\t2\t3\t4\t50", "\tx\t2\t3\t4\t50");
        assert!(parse_tsv(&raw).boxes.is_empty());
    }

    #[test]
    fn structural_rows_with_empty_token_are_dropped() {
        let raw = format!("{HEADER}\n2\t1\t1\t0\t0\t0\t0\t0\t640\t480\t-1\t");
        assert!(parse_tsv(&raw).boxes.is_empty());
    }

    #[test]
    fn fractional_confidence_is_truncated() {
        let raw = format!("{HEADER}\n{}", record(0, 0, 10, 10, "96.839996", "word"));
        assert_eq!(parse_tsv(&raw).boxes[0].confidence, 96);
    }

    #[test]
    fn set_text_concatenates_all_tokens_in_order() {
        let raw = format!(
            "{HEADER}\n{}\n{}\n{}",
            record(0, 0, 5, 5, "80", "one"),
            "not a record",
            record(10, 0, 5, 5, "60", "two"),
        );
        let set = parse_tsv(&raw);
        assert_eq!(set.boxes.len(), 2);
        assert_eq!(set.text, "one two");
    }
}
