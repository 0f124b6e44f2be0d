// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::sequence_bench::bench_sequence;
use crate::subject_bench::bench_subject;
use criterion::{criterion_group, criterion_main};


criterion_group!(benches, bench_subject, bench_sequence);
criterion_main!(benches);
