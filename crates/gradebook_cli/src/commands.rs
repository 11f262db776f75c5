//! Subcommand implementations.

use std::io::Write;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use gradebook_core::{
    format_number, render_record_text, FileRecordRepository, GradeBook, RecordId, RecordService,
};

use crate::cli::CalcArgs;

pub type Service = RecordService<FileRecordRepository>;

/// Splits `name:grade:credits` on its last two colons.
pub fn parse_subject_arg(raw: &str) -> Result<(String, String, f64)> {
    let mut parts = raw.rsplitn(3, ':');
    let (Some(credits), Some(grade), Some(name)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(anyhow!("subject `{raw}` must look like `name:grade:credits`"));
    };
    let credits = credits
        .trim()
        .parse::<f64>()
        .with_context(|| format!("subject `{raw}` has non-numeric credits `{credits}`"))?;
    Ok((name.to_string(), grade.to_string(), credits))
}

pub fn run_calc(service: &Service, args: &CalcArgs, out: &mut impl Write) -> Result<()> {
    let mut book = GradeBook::new();
    for raw in &args.subjects {
        let (name, grade, credits) = parse_subject_arg(raw)?;
        book.add_subject(&name, &grade, credits)
            .with_context(|| format!("invalid subject `{raw}`"))?;
    }

    let record = book.finalize(&args.name, &args.reg_no)?;
    for entry in book.subjects() {
        writeln!(out, "{entry}")?;
    }
    writeln!(out, "GPA: {}", format_number(record.gpa))?;

    if !args.no_save {
        service
            .save(&record)
            .with_context(|| format!("failed to save record `{}`", record.reg_no))?;
        writeln!(out, "Saved record for {}", record.name)?;
    }
    Ok(())
}

pub fn run_list(service: &Service, out: &mut impl Write) -> Result<()> {
    for id in service.list()? {
        writeln!(out, "{id}")?;
    }
    Ok(())
}

pub fn run_show(service: &Service, reg_no: &str, out: &mut impl Write) -> Result<()> {
    let id = RecordId::new(reg_no)?;
    let record = service
        .load(&id)
        .with_context(|| format!("failed to load record `{id}`"))?;
    write!(out, "{}", render_record_text(&record))?;
    Ok(())
}

pub fn run_export(
    service: &Service,
    reg_no: &str,
    destination: &Path,
    out: &mut impl Write,
) -> Result<()> {
    let id = RecordId::new(reg_no)?;
    let record = service
        .load(&id)
        .with_context(|| format!("failed to load record `{id}`"))?;
    service.export_text(&record, destination)?;
    writeln!(out, "Exported {id} to {}", destination.display())?;
    Ok(())
}

pub fn run_compare(service: &Service, out: &mut impl Write, err: &mut impl Write) -> Result<()> {
    let set = service.all_for_comparison()?;
    if set.is_empty() {
        writeln!(err, "No records to compare.")?;
    }
    for point in &set.points {
        writeln!(out, "{}\t{}", point.name, format_number(point.gpa))?;
    }
    for skipped in &set.skipped {
        writeln!(err, "skipped {}: {}", skipped.entry, skipped.reason)?;
    }
    Ok(())
}
