use chrono::{DateTime, Utc};

/// Issues synthetic `<prefix>-<millis>.<ext>` artifact names.
///
/// The millisecond stamp is bumped when needed so names stay unique even for
/// captures within the same millisecond.
#[derive(Debug, Clone)]
pub struct ArtifactNamer {
    prefix: String,
    last_stamp: Option<i64>,
}

impl ArtifactNamer {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            last_stamp: None,
        }
    }

    pub fn next_name(&mut self, extension: &str, now: DateTime<Utc>) -> String {
        let mut stamp = now.timestamp_millis();
        if let Some(last) = self.last_stamp {
            if stamp <= last {
                stamp = last + 1;
            }
        }
        self.last_stamp = Some(stamp);
        format!("{}-{}.{}", self.prefix, stamp, extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_timestamp_millis() {
        let now = DateTime::<Utc>::from_timestamp_millis(1_700_000_000_123).unwrap();
        let mut namer = ArtifactNamer::new("scan");
        assert_eq!(namer.next_name("jpg", now), "scan-1700000000123.jpg");
    }

    #[test]
    fn same_millisecond_yields_distinct_names() {
        let now = DateTime::<Utc>::from_timestamp_millis(1_700_000_000_000).unwrap();
        let mut namer = ArtifactNamer::new("scan");
        let a = namer.next_name("jpg", now);
        let b = namer.next_name("jpg", now);
        let c = namer.next_name("webm", now);

        assert_eq!(a, "scan-1700000000000.jpg");
        assert_eq!(b, "scan-1700000000001.jpg");
        assert_eq!(c, "scan-1700000000002.webm");
    }

    #[test]
    fn clock_going_backwards_still_increases() {
        let later = DateTime::<Utc>::from_timestamp_millis(2_000).unwrap();
        let earlier = DateTime::<Utc>::from_timestamp_millis(1_000).unwrap();
        let mut namer = ArtifactNamer::new("scan");
        namer.next_name("jpg", later);
        assert_eq!(namer.next_name("jpg", earlier), "scan-2001.jpg");
    }
}
