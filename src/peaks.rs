use log::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    pub offset: usize,
    pub height: f64,
}

/// Minimum peak separation: template length scaled by the separation
/// factor, never less than one.
pub fn minimum_distance(template_len: usize, separation_factor: f64) -> usize {
    ((template_len as f64 * separation_factor).round() as usize).max(1)
}

/// Thresholded, distance-constrained peak selection. Of two candidates
/// closer than `min_distance` the lower one is discarded, equal heights
/// resolved in favor of the earlier offset. Sorted by ascending offset;
/// empty output is an ordinary outcome.
pub fn find_peaks(scores: &[f64], threshold: f64, min_distance: usize) -> Vec<Peak> {
    let candidates: Vec<Peak> = local_maxima(scores)
        .into_iter()
        .filter(|p| p.height >= threshold)
        .collect();

    // Highest first, earlier offset breaking ties; each kept peak
    // suppresses lower-ranked neighbors within min_distance.
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by(|&a, &b| {
        candidates[b]
            .height
            .total_cmp(&candidates[a].height)
            .then(candidates[a].offset.cmp(&candidates[b].offset))
    });

    let mut keep = vec![true; candidates.len()];
    for &idx in &order {
        if !keep[idx] {
            continue;
        }
        let offset = candidates[idx].offset;
        let mut j = idx;
        while j > 0 && offset - candidates[j - 1].offset < min_distance {
            j -= 1;
            keep[j] = false;
        }
        let mut j = idx + 1;
        while j < candidates.len() && candidates[j].offset - offset < min_distance {
            keep[j] = false;
            j += 1;
        }
    }

    let peaks: Vec<Peak> = candidates
        .into_iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(p))
        .collect();
    debug!("Peak extraction kept {} of {} candidates", peaks.len(), order.len());
    peaks
}

// Interior local maxima. A run of equal values bounded by strictly
// smaller neighbors counts once, at the run's last offset, so an exact
// template embedding beats the lead-in window that zero-means to the
// same shape. The first and last samples are never peaks.
fn local_maxima(x: &[f64]) -> Vec<Peak> {
    let mut peaks = Vec::new();
    if x.len() < 3 {
        return peaks;
    }
    let last = x.len() - 1;
    let mut i = 1;
    while i < last {
        if x[i - 1] < x[i] {
            let mut ahead = i + 1;
            while ahead < last && x[ahead] == x[i] {
                ahead += 1;
            }
            if x[ahead] < x[i] {
                let offset = ahead - 1;
                peaks.push(Peak { offset, height: x[offset] });
                i = ahead;
            }
        }
        i += 1;
    }
    peaks
}
