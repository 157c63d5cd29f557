use std::io::Write;

use derive_builder::Builder;
use libhirsch::align::Cost;
use serde::Serialize;

/// The persisted outcome of one measured alignment.
#[derive(Builder, Serialize, Debug, Clone, PartialEq)]
#[builder(setter(into))]
pub struct Report {
    pub cost: Cost,
    pub aligned_s: String,
    pub aligned_t: String,
    pub time_ms: f64,
    pub memory_kib: i64,
}

impl Report {
    /// Five lines: cost, aligned S, aligned T, milliseconds, KiB.
    pub fn write(&self, out: &mut impl Write) -> anyhow::Result<()> {
        writeln!(out, "{}", self.cost)?;
        writeln!(out, "{}", self.aligned_s)?;
        writeln!(out, "{}", self.aligned_t)?;
        writeln!(out, "{}", self.time_ms)?;
        writeln!(out, "{}", self.memory_kib)?;
        Ok(())
    }

    pub fn write_json(&self, out: &mut impl Write) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};

    fn report() -> Report {
        ReportBuilder::default()
            .cost(78u32)
            .aligned_s("AAAC")
            .aligned_t("_AGC")
            .time_ms(1.25)
            .memory_kib(-8)
            .build()
            .unwrap()
    }

    #[test]
    fn test_write_lines() {
        let mut out: Vec<u8> = vec![];
        report().write(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        check!(lines == vec!["78", "AAAC", "_AGC", "1.25", "-8"]);
    }

    #[test]
    fn test_write_json() {
        let mut out: Vec<u8> = vec![];
        report().write_json(&mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        check!(value["cost"] == 78);
        check!(value["aligned_s"] == "AAAC");
        check!(value["aligned_t"] == "_AGC");
        check!(value["time_ms"] == 1.25);
        check!(value["memory_kib"] == -8);
    }

    #[test]
    fn test_builder_requires_every_field() {
        let_assert!(Err(_) = ReportBuilder::default().cost(0u32).build());
    }
}
