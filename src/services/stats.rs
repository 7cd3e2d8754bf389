//! Per-court notice counts.

use std::collections::HashMap;

use crate::models::{CourtStats, NoticeSummary};

/// Groups records by exact court name.
pub struct StatsAggregator;

impl StatsAggregator {
    /// Count records per court, most frequent first.
    ///
    /// Courts with equal counts keep the order in which they first appear.
    /// Names are compared verbatim, so spelling variants count separately.
    pub fn aggregate(records: &[NoticeSummary]) -> Vec<CourtStats> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut stats: Vec<CourtStats> = Vec::new();

        for notice in records {
            match index.get(notice.court.as_str()) {
                Some(&i) => stats[i].count += 1,
                None => {
                    index.insert(&notice.court, stats.len());
                    stats.push(CourtStats {
                        court: notice.court.clone(),
                        count: 1,
                    });
                }
            }
        }

        // stable sort keeps first-seen order among ties
        stats.sort_by(|a, b| b.count.cmp(&a.count));
        stats
    }
}
