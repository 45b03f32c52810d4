//! Minimal metrics registry for the gateway.
//!
//! Labels are flattened into sorted key vectors so rendering order is
//! deterministic. Histogram buckets are fixed in microseconds.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

type LabelKey = Vec<(String, String)>;

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_str(key: &LabelKey) -> String {
    key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

fn series(name: &str, labels: &str) -> String {
    if labels.is_empty() {
        name.to_string()
    } else {
        format!("{name}{{{labels}}}")
    }
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        self.map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(v, Ordering::Relaxed);
    }

    /// Current value for an exact label set (0 when never touched).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {name} counter");
        for r in self.map.iter() {
            let val = r.value().load(Ordering::Relaxed);
            let _ = writeln!(out, "{} {}", series(name, &label_str(r.key())), val);
        }
    }
}

// Fixed buckets in microseconds: 10us .. 100ms
const BUCKET_COUNT: usize = 7;
const BUCKETS_MICROS: [u64; BUCKET_COUNT] = [10, 50, 100, 500, 1_000, 10_000, 100_000];

#[derive(Default)]
struct AtomicHistogram {
    count: AtomicU64,
    sum: AtomicU64,
    buckets: [AtomicU64; BUCKET_COUNT],
}

#[derive(Default)]
pub struct HistogramVec {
    map: DashMap<LabelKey, AtomicHistogram>,
}

impl HistogramVec {
    /// Observe a duration into cumulative microsecond buckets.
    pub fn observe(&self, labels: &[(&str, &str)], duration: Duration) {
        let hist = self.map
            .entry(label_key(labels))
            .or_insert_with(AtomicHistogram::default);
        let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);

        hist.count.fetch_add(1, Ordering::Relaxed);
        hist.sum.fetch_add(micros, Ordering::Relaxed);
        for (i, &b) in BUCKETS_MICROS.iter().enumerate() {
            if micros <= b {
                hist.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {name} histogram");
        for r in self.map.iter() {
            let labels = label_str(r.key());
            let hist = r.value();
            let prefix = if labels.is_empty() { String::new() } else { format!("{labels},") };

            for (i, &le) in BUCKETS_MICROS.iter().enumerate() {
                let count = hist.buckets[i].load(Ordering::Relaxed);
                let _ = writeln!(out, "{name}_bucket{{{prefix}le=\"{le}\"}} {count}");
            }
            let count = hist.count.load(Ordering::Relaxed);
            let _ = writeln!(out, "{name}_bucket{{{prefix}le=\"+Inf\"}} {count}");
            let sum = hist.sum.load(Ordering::Relaxed);
            let _ = writeln!(out, "{} {}", series(&format!("{name}_sum"), &labels), sum);
            let _ = writeln!(out, "{} {}", series(&format!("{name}_count"), &labels), count);
        }
    }
}

#[derive(Default)]
pub struct GatewayMetrics {
    pub requests: CounterVec,
    pub records_appended: CounterVec,
    pub records_rejected: CounterVec,
    pub empty_dataset: CounterVec,
    pub sessions_swept: CounterVec,
    pub compute_duration: HistogramVec, // In Microseconds
    draining: AtomicBool,
}

impl GatewayMetrics {
    pub fn set_draining(&self) {
        self.draining.store(true, Ordering::Relaxed);
    }

    pub fn is_draining(&self) -> bool {
        self.draining.load(Ordering::Relaxed)
    }

    /// Render all metrics plus gauge lines supplied by the caller.
    pub fn render(&self, extra: &[(&str, u64)]) -> String {
        let mut out = String::new();
        self.requests.render("wattwise_requests_total", &mut out);
        self.records_appended.render("wattwise_records_appended_total", &mut out);
        self.records_rejected.render("wattwise_records_rejected_total", &mut out);
        self.empty_dataset.render("wattwise_empty_dataset_total", &mut out);
        self.sessions_swept.render("wattwise_sessions_swept_total", &mut out);
        self.compute_duration.render("wattwise_compute_duration_micros", &mut out);

        let _ = writeln!(
            out,
            "# TYPE wattwise_draining gauge\nwattwise_draining {}",
            u8::from(self.is_draining())
        );
        for (k, v) in extra {
            let _ = writeln!(out, "# TYPE {k} gauge\n{k} {v}");
        }
        out
    }
}
