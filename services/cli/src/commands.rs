use crate::infra::{load_child, parse_birth_date, parse_category, parse_date, save_child};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;
use vaxkeeper::error::AppError;
use vaxkeeper::schedule::{
    AdministrationLog, AdministrationRequest, AgeCategory, BirthDate, DoseLabel, HistoryImporter,
    IntervalEnforcement, VaccinationScheduler, VaccineCode,
};

#[derive(Args, Debug)]
pub(crate) struct ClassifyArgs {
    /// Date of birth (YYYY-MM-DD)
    #[arg(long, value_parser = parse_birth_date)]
    pub(crate) birth_date: BirthDate,
    /// Reference date (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct CompensationArgs {
    /// Child's age in whole months
    #[arg(long)]
    pub(crate) months: u32,
}

#[derive(Args, Debug)]
pub(crate) struct DosesArgs {
    /// Vaccine code, e.g. "M.M.R"
    #[arg(long)]
    pub(crate) code: String,
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Child file (JSON)
    #[arg(long)]
    pub(crate) child: PathBuf,
    /// Vaccine code of the candidate dose
    #[arg(long)]
    pub(crate) code: String,
    /// Dose label of the candidate dose
    #[arg(long)]
    pub(crate) dose: String,
    /// Visit date (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct RecordArgs {
    /// Child file (JSON); rewritten in place on success
    #[arg(long)]
    pub(crate) child: PathBuf,
    /// Vaccine code to administer
    #[arg(long)]
    pub(crate) code: String,
    /// Dose label to administer
    #[arg(long)]
    pub(crate) dose: String,
    /// Visit category; defaults to the category derived from the child's age
    #[arg(long, value_parser = parse_category)]
    pub(crate) category: Option<AgeCategory>,
    /// Free-text notes stored with the record
    #[arg(long, default_value = "")]
    pub(crate) notes: String,
    /// Visit date (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct DeleteArgs {
    /// Child file (JSON); rewritten in place on success
    #[arg(long)]
    pub(crate) child: PathBuf,
    /// 1-based position of the record as listed by `evaluate`
    #[arg(long)]
    pub(crate) position: usize,
}

#[derive(Args, Debug)]
pub(crate) struct ImportArgs {
    /// Child file (JSON); rewritten in place on success
    #[arg(long)]
    pub(crate) child: PathBuf,
    /// CSV register with Date, Vaccine, Dose, Notes, Age Category columns
    #[arg(long)]
    pub(crate) csv: PathBuf,
}

fn today_or_now(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| Local::now().date_naive())
}

pub(crate) fn run_catalog(scheduler: &VaccinationScheduler) -> Result<(), AppError> {
    let catalog = scheduler.catalog();
    println!("Vaccine catalog");
    for definition in catalog.definitions() {
        let doses: Vec<&str> = definition.doses.iter().map(DoseLabel::as_str).collect();
        println!(
            "- {} | doses: {} | min interval: {} day(s)",
            definition.display_label(),
            doses.join(", "),
            catalog.interval_days(definition.code.as_str())
        );
        if !definition.restrictions.is_empty() {
            let restricted: Vec<&str> = definition
                .restrictions
                .iter()
                .map(VaccineCode::as_str)
                .collect();
            println!("    not with: {}", restricted.join(", "));
        }
    }
    Ok(())
}

pub(crate) fn run_classify(
    scheduler: &VaccinationScheduler,
    args: ClassifyArgs,
) -> Result<(), AppError> {
    let as_of = today_or_now(args.as_of);
    let profile = scheduler.classify_age(args.birth_date, as_of)?;
    println!(
        "Age on {}: {} year(s), {} month(s), {} day(s) ({} months total)",
        as_of, profile.years, profile.months, profile.days, profile.total_months
    );
    println!(
        "Category: {} ({})",
        profile.category.key(),
        profile.category.label()
    );
    Ok(())
}

pub(crate) fn run_compensation(
    scheduler: &VaccinationScheduler,
    args: CompensationArgs,
) -> Result<(), AppError> {
    let eligible = scheduler.eligible_compensation_vaccines(args.months);
    println!("Catch-up vaccines at {} month(s):", args.months);
    for code in eligible {
        let label = scheduler
            .catalog()
            .display_label(code.as_str())
            .unwrap_or_else(|_| code.to_string());
        println!("- {}", label);
    }
    Ok(())
}

pub(crate) fn run_doses(scheduler: &VaccinationScheduler, args: DosesArgs) -> Result<(), AppError> {
    let doses = scheduler.doses_for_vaccine(&args.code)?;
    println!("{} doses:", args.code);
    for (index, dose) in doses.iter().enumerate() {
        println!("  {}. {}", index + 1, dose);
    }
    Ok(())
}

pub(crate) fn run_evaluate(
    scheduler: &VaccinationScheduler,
    args: EvaluateArgs,
) -> Result<(), AppError> {
    let child = load_child(&args.child)?;
    let today = today_or_now(args.today);
    let profile = child.age_profile(today)?;

    println!("Child: {}", child.full_name());
    println!(
        "Age category today: {} ({} months)",
        profile.category.key(),
        profile.total_months
    );
    render_log(&child.vaccinations);

    let evaluation = scheduler.evaluate_candidate(
        &args.code,
        &DoseLabel::new(args.dose.clone()),
        &child.vaccinations,
        today,
    );
    println!("\nCandidate: {} ({})", args.code, args.dose);
    let restriction_word = if evaluation.restriction.allowed() {
        "ok"
    } else {
        "blocked"
    };
    let interval_word = match (
        evaluation.interval.allowed(),
        scheduler.config().interval_enforcement,
    ) {
        (true, _) => "ok",
        (false, IntervalEnforcement::Advisory) => "warning",
        (false, IntervalEnforcement::Blocking) => "blocked",
    };
    println!(
        "  Restriction: {} - {}",
        restriction_word,
        evaluation.restriction.message()
    );
    println!(
        "  Interval: {} - {}",
        interval_word,
        evaluation.interval.message()
    );
    Ok(())
}

pub(crate) fn run_record(scheduler: &VaccinationScheduler, args: RecordArgs) -> Result<(), AppError> {
    let mut child = load_child(&args.child)?;
    let today = today_or_now(args.today);
    let profile = child.age_profile(today)?;

    let request = AdministrationRequest {
        age_category: args.category.unwrap_or(profile.category),
        age_months: profile.total_months,
        code: VaccineCode::new(args.code),
        dose: DoseLabel::new(args.dose),
        notes: args.notes,
    };

    let entry = scheduler.record_administration(request, &mut child.vaccinations, today)?;
    save_child(&args.child, &child)?;
    let record = entry.record;

    println!(
        "Recorded {} ({}) on {} for {}",
        record.vaccine_label(),
        record.dose_label(),
        record.date(),
        child.full_name()
    );
    Ok(())
}

pub(crate) fn run_delete(scheduler: &VaccinationScheduler, args: DeleteArgs) -> Result<(), AppError> {
    let mut child = load_child(&args.child)?;
    let id = child.vaccinations.id_at(args.position)?;

    let removed = scheduler.delete_administration(&mut child.vaccinations, id)?;
    save_child(&args.child, &child)?;

    println!(
        "Deleted {} ({}) given on {}",
        removed.vaccine_label(),
        removed.dose_label(),
        removed.date()
    );
    Ok(())
}

pub(crate) fn run_import(scheduler: &VaccinationScheduler, args: ImportArgs) -> Result<(), AppError> {
    let mut child = load_child(&args.child)?;
    let importer = HistoryImporter::new(scheduler.catalog(), child.birth_date);
    let records = importer.import_path(&args.csv)?;
    let count = records.len();

    for record in records {
        child.vaccinations.append(record);
    }
    save_child(&args.child, &child)?;

    println!("Imported {} historical dose(s) into {}", count, child.full_name());
    Ok(())
}

fn render_log(log: &AdministrationLog) {
    if log.is_empty() {
        println!("\nRecorded doses: none");
        return;
    }

    println!("\nRecorded doses");
    for (index, entry) in log.entries().iter().enumerate() {
        let record = &entry.record;
        let unreadable = if record.parsed_date().is_none() {
            " (date unreadable)"
        } else {
            ""
        };
        println!(
            "  {}. {} | {} | {} | {}{}",
            index + 1,
            record.date(),
            record.vaccine_label(),
            record.dose_label(),
            record.age_category().key(),
            unreadable
        );
    }
}
