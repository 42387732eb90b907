use log::debug;
use serde::{Deserialize, Serialize};

use crate::peaks::Peak;
use crate::signal::Signal;

/// One detected occurrence of the template. Indices are inclusive on
/// both ends; times come from the readings time axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pulse {
    pub id: usize,
    pub start_index: usize,
    pub end_index: usize,
    pub start_time: f64,
    pub end_time: f64,
    pub similarity_score: f64,
}

/// Maps accepted peaks back into readings space: each peak at offset `i`
/// spans `[i, i + template_len)`. A span running past the end of the
/// readings is a windowing artifact and is skipped without comment.
pub fn assemble(peaks: &[Peak], readings: &Signal, template_len: usize) -> (Vec<Pulse>, Signal) {
    let mut zeroed = vec![0.0; readings.len()];
    let mut pulses = Vec::with_capacity(peaks.len());

    for peak in peaks {
        let start = peak.offset;
        let end = start + template_len;
        if template_len == 0 || end > readings.len() {
            debug!("Skipping pulse span [{start}, {end}) outside readings bounds");
            continue;
        }

        // ascending offset order, last write wins if spans ever overlap
        zeroed[start..end].copy_from_slice(&readings.samples[start..end]);
        pulses.push(Pulse {
            id: pulses.len() + 1,
            start_index: start,
            end_index: end - 1,
            start_time: readings.time[start],
            end_time: readings.time[end - 1],
            similarity_score: peak.height,
        });
    }

    (pulses, Signal::with_time(zeroed, readings.time.clone()))
}
