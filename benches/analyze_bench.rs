use std::collections::HashMap;
use std::path::{Path, PathBuf};

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use wsl_reclaim::analyze::{analyze, AnalyzeOptions, SizeEntry, UsageProbe};
use wsl_reclaim::error::Result;

/// Synthetic probe: `width` top-level branches, each three levels deep.
struct SyntheticProbe {
    listings: HashMap<PathBuf, Vec<SizeEntry>>,
}

impl SyntheticProbe {
    fn new(width: usize) -> Self {
        let mut listings = HashMap::new();

        let mut root = vec![SizeEntry::new(100_000_000, "/")];
        for i in 0..width {
            let top = format!("/dir{}", i);
            root.push(SizeEntry::new(1_000_000 + i as u64, &top));

            let mid = format!("{}/sub", top);
            listings.insert(
                PathBuf::from(&top),
                vec![
                    SizeEntry::new(1_000_000, &top),
                    SizeEntry::new(500_000, &mid),
                ],
            );
            listings.insert(
                PathBuf::from(&mid),
                vec![
                    SizeEntry::new(500_000, &mid),
                    SizeEntry::new(250_000, format!("{}/leaf", mid)),
                ],
            );
        }
        listings.insert(PathBuf::from("/"), root);

        Self { listings }
    }
}

impl UsageProbe for SyntheticProbe {
    fn usage(&self, dir: &Path, _excludes: &[PathBuf]) -> Result<Vec<SizeEntry>> {
        Ok(self.listings.get(dir).cloned().unwrap_or_default())
    }
}

fn bench_analyze(c: &mut Criterion) {
    let options = AnalyzeOptions::new().with_threshold_kb(1);

    for width in [4usize, 16, 64] {
        let probe = SyntheticProbe::new(width);
        c.bench_function(&format!("analyze_{}_branches", width), |b| {
            b.iter(|| analyze(black_box(&probe), Path::new("/"), &options))
        });
    }
}

criterion_group!(benches, bench_analyze);
criterion_main!(benches);
