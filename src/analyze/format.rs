//! Size formatting for the analysis report.
//!
//! The report measures everything in kilobytes (`du -k` units). Values are
//! rendered with unit-dependent precision: plain KB below 1 MiB-in-KB, whole
//! megabytes below 1 GiB-in-KB, and gigabytes with one truncated decimal digit
//! above that.

/// One GiB expressed in KB.
pub const GB_KB: u64 = 1_048_576;

/// One MiB expressed in KB.
pub const MB_KB: u64 = 1_024;

/// Divisor for the tenths-of-GB digit.
///
/// Deliberately 104_857 rather than GB_KB/10 exactly; the observable output of
/// historical reports depends on this truncation, so it is kept as-is.
const GB_TENTHS_KB: u64 = 104_857;

/// Format a KB quantity for display in the report.
///
/// Truncating everywhere: `1023` → `"1023K"`, `1024` → `"1M"`,
/// `1_048_575` → `"1023M"`, `1_048_576` → `"1.0G"`.
pub fn format_kb(kb: u64) -> String {
    if kb >= GB_KB {
        let whole = kb / GB_KB;
        let tenths = (kb % GB_KB) / GB_TENTHS_KB;
        format!("{}.{}G", whole, tenths)
    } else if kb >= MB_KB {
        format!("{}M", kb / MB_KB)
    } else {
        format!("{}K", kb)
    }
}

/// True when the value falls in the gigabyte range and should be highlighted.
pub fn is_large(kb: u64) -> bool {
    kb >= GB_KB
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_kilobyte_range() {
        assert_eq!(format_kb(0), "0K");
        assert_eq!(format_kb(1), "1K");
        assert_eq!(format_kb(1023), "1023K");
    }

    #[test]
    fn test_format_megabyte_range() {
        assert_eq!(format_kb(1024), "1M");
        assert_eq!(format_kb(1536), "1M"); // truncated, not rounded
        assert_eq!(format_kb(150_000), "146M");
        assert_eq!(format_kb(1_048_575), "1023M");
    }

    #[test]
    fn test_format_gigabyte_range() {
        assert_eq!(format_kb(1_048_576), "1.0G");
        assert_eq!(format_kb(2_000_000), "1.9G");
    }

    #[test]
    fn test_gigabyte_tenths_are_truncated() {
        // 104_857 KB past the GB mark is exactly one tenths step
        assert_eq!(format_kb(1_048_576 + 104_857), "1.1G");
        assert_eq!(format_kb(1_048_576 + 209_714), "1.2G");
        // one below a tenths step stays at the previous digit
        assert_eq!(format_kb(1_048_576 + 104_856), "1.0G");
    }

    #[test]
    fn test_unit_class_boundaries() {
        assert!(format_kb(1023).ends_with('K'));
        assert!(format_kb(1024).ends_with('M'));
        assert!(format_kb(1_048_575).ends_with('M'));
        assert!(format_kb(1_048_576).ends_with('G'));
    }

    #[test]
    fn test_is_large() {
        assert!(!is_large(1_048_575));
        assert!(is_large(1_048_576));
    }
}
