use std::io::Write;

use crate::pulse::Pulse;
use crate::signal::Signal;

/// Column order is a compatibility contract with existing reports; do not
/// reorder.
pub const REPORT_HEADER: &str = "id,start_index,end_index,start_time,end_time,similarity_score";

pub fn write_pulse_report<W: Write>(mut out: W, pulses: &[Pulse]) -> std::io::Result<()> {
    writeln!(out, "{REPORT_HEADER}")?;
    for p in pulses {
        writeln!(
            out,
            "{},{},{},{},{},{}",
            p.id, p.start_index, p.end_index, p.start_time, p.end_time, p.similarity_score
        )?;
    }
    Ok(())
}

/// Two-column dump of a signal, used for the noise-zeroed output.
pub fn write_signal_csv<W: Write>(mut out: W, signal: &Signal) -> std::io::Result<()> {
    writeln!(out, "time,value")?;
    for (t, v) in signal.time.iter().zip(&signal.samples) {
        writeln!(out, "{t},{v}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_column_order() {
        let pulses = vec![Pulse {
            id: 1,
            start_index: 2,
            end_index: 4,
            start_time: 1.0,
            end_time: 2.0,
            similarity_score: 0.5,
        }];
        let mut buf = Vec::new();
        write_pulse_report(&mut buf, &pulses).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(REPORT_HEADER));
        assert_eq!(lines.next(), Some("1,2,4,1,2,0.5"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_empty_report_is_header_only() {
        let mut buf = Vec::new();
        write_pulse_report(&mut buf, &[]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), format!("{REPORT_HEADER}\n"));
    }

    #[test]
    fn test_signal_csv() {
        let sig = Signal::with_time(vec![0.0, 3.5], vec![10.0, 11.0]);
        let mut buf = Vec::new();
        write_signal_csv(&mut buf, &sig).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "time,value\n10,0\n11,3.5\n");
    }
}
