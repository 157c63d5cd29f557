use std::io::Write;
use std::path::Path;

use anyhow::Context;
use libhirsch::align::structs::Alignment;
use libhirsch::align::{align_hirschberg, align_linear_cost, align_quadratic, backtrack, CostModel};

use crate::args::{AlignArgs, Algorithm, CommonArgs, CostArgs};
use crate::instrument::Instrument;
use crate::io::read_sequences;
use crate::report::{Report, ReportBuilder};
use crate::util::PathBufExt;

type Aligner = fn(&[u8], &[u8], &CostModel) -> anyhow::Result<Alignment>;

/// Fill the full cost table and backtrack through it.
fn quadratic(s: &[u8], t: &[u8], model: &CostModel) -> anyhow::Result<Alignment> {
    let (_, table) = align_quadratic(s, t, model)?;

    if log::log_enabled!(log::Level::Trace) {
        let mut dump: Vec<u8> = vec![];
        table.dump(&mut dump, s, t)?;
        log::trace!("cost table:\n{}", String::from_utf8_lossy(&dump));
    }

    backtrack(&table, s, t, model)
}

fn aligner(algorithm: Algorithm) -> Aligner {
    match algorithm {
        Algorithm::Quadratic => quadratic,
        Algorithm::Hirschberg => align_hirschberg,
    }
}

pub fn load_cost_model(common_args: &CommonArgs) -> anyhow::Result<CostModel> {
    match &common_args.cost_model_path {
        Some(path) => {
            log::info!("loading cost model: {}", path.to_string_lossy());
            CostModel::from_json_path(path)
        }
        None => Ok(CostModel::default()),
    }
}

/// Align the two sequences of `input_path` and measure the final run.
pub fn measured_alignment(
    input_path: &impl AsRef<Path>,
    algorithm: Algorithm,
    warmup: usize,
    model: &CostModel,
) -> anyhow::Result<(Alignment, Report)> {
    let (s, t) = read_sequences(input_path)?;
    log::info!(
        "aligning {} ({}) against {} ({}) with {algorithm}",
        s.name,
        s.length,
        t.name,
        t.length
    );
    log::debug!("input sequences:\n{s}\n{t}");

    let run_aligner = aligner(algorithm);

    for run in 0..warmup {
        log::debug!("warmup run {}/{warmup}", run + 1);
        run_aligner(&s.digital_bytes, &t.digital_bytes, model)?;
    }

    let (alignment, measurement) =
        Instrument::measure(|| run_aligner(&s.digital_bytes, &t.digital_bytes, model));
    let alignment = alignment.context("alignment failed")?;

    let report = ReportBuilder::default()
        .cost(alignment.cost)
        .aligned_s(alignment.s_string())
        .aligned_t(alignment.t_string())
        .time_ms(measurement.elapsed_ms())
        .memory_kib(measurement.memory_delta_kib)
        .build()?;

    Ok((alignment, report))
}

pub fn align(args: &AlignArgs) -> anyhow::Result<()> {
    let model = load_cost_model(&args.common_args)?;

    let (alignment, report) =
        measured_alignment(&args.input_path, args.algorithm, args.warmup, &model)?;

    let mut out = args.output_path.open(args.common_args.allow_overwrite)?;
    if args.json {
        report.write_json(&mut out)?;
    } else {
        report.write(&mut out)?;
    }
    out.flush()?;

    if args.display {
        print!("{}", alignment.ali_string(80));
    }

    Ok(())
}

pub fn cost(args: &CostArgs) -> anyhow::Result<()> {
    let model = load_cost_model(&args.common_args)?;
    let (s, t) = read_sequences(&args.input_path)?;

    let (cost, measurement) =
        Instrument::measure(|| align_linear_cost(&s.digital_bytes, &t.digital_bytes, &model));
    let cost = cost?;

    log::info!(
        "cost computed in {:.3} ms, {} KiB",
        measurement.elapsed_ms(),
        measurement.memory_delta_kib
    );
    println!("{cost}");

    Ok(())
}
