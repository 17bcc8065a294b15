//! Recovery CLI - Command-line interface for Recovery Flux
//!
//! Commands:
//! - score: Compute CRI/MRI reports from records or flags
//! - validate: Check records against the input contract
//! - tiers: Print tier and level thresholds
//! - doctor: Diagnose configuration and environment
//! - schema: Print input/output schemas

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use recovery_flux::classifier::TIER_THRESHOLDS;
use recovery_flux::config::{default_path, OutputFormat};
use recovery_flux::encoder::{ReportEncoder, REPORT_VERSION};
use recovery_flux::progression::LEVEL_THRESHOLDS;
use recovery_flux::types::{ContinuityMode, RecoveryReport};
use recovery_flux::{
    ComputeError, EngineConfig, InputRecord, RecordAdapter, RecoveryEngine, RecoveryProcessor,
    Tier, FLUX_VERSION, PRODUCER_NAME,
};

/// Recovery - Deterministic sleep recovery scoring
#[derive(Parser)]
#[command(name = "recovery")]
#[command(version = FLUX_VERSION)]
#[command(about = "Estimate cognitive and muscular recovery from weekly sleep metrics", long_about = None)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./recovery.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute recovery reports
    Score {
        /// Input file path (use - for stdin); flags alone are used if omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Output file path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (overrides config)
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Refuse input outside the documented ranges
        #[arg(long)]
        strict: bool,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Check records against the input contract
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Print tier and level thresholds
    Tiers {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Diagnose configuration and environment
    Doctor {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print schema information
    Schema {
        /// Schema to print (input or output)
        #[arg(value_enum)]
        schema_type: SchemaType,
    },
}

/// Per-field overrides; these win over file records and config defaults
#[derive(Args, Default)]
struct FieldArgs {
    /// Total sleep time (hours)
    #[arg(long)]
    tst: Option<f64>,
    /// Deep (slow-wave) sleep (hours)
    #[arg(long)]
    sws: Option<f64>,
    /// REM sleep (hours)
    #[arg(long)]
    rem: Option<f64>,
    /// Which continuity reading to use
    #[arg(long)]
    continuity_mode: Option<ModeArg>,
    /// Wake after sleep onset (minutes)
    #[arg(long)]
    waso: Option<f64>,
    /// Awakenings per night
    #[arg(long)]
    wakes: Option<u32>,
    /// Bedtime standard deviation (hours)
    #[arg(long)]
    bt_sd: Option<f64>,
    /// Wake-time standard deviation (hours)
    #[arg(long)]
    wu_sd: Option<f64>,
    /// Device sleep score (0-100)
    #[arg(long)]
    sleep_score: Option<f64>,
    /// Bedroom temperature (°C)
    #[arg(long)]
    temp: Option<f64>,
    /// Bedroom relative humidity (%)
    #[arg(long)]
    rh: Option<f64>,
    /// Screen time after 9 PM (hours)
    #[arg(long)]
    screens: Option<f64>,
    /// Hours between last meal and bed
    #[arg(long)]
    last_meal: Option<f64>,
    /// Earplug usage (0 none, 1 some, 2 nightly)
    #[arg(long)]
    earplugs: Option<u8>,
    /// Consecutive days logged
    #[arg(long)]
    streak: Option<u32>,
}

impl FieldArgs {
    fn to_record(&self) -> InputRecord {
        InputRecord {
            total_sleep_hours: self.tst,
            deep_sleep_hours: self.sws,
            rem_sleep_hours: self.rem,
            continuity_mode: self.continuity_mode.map(ContinuityMode::from),
            waso_minutes: self.waso,
            wake_count: self.wakes,
            bedtime_sd_hours: self.bt_sd,
            wake_time_sd_hours: self.wu_sd,
            device_sleep_score: self.sleep_score,
            temperature_c: self.temp,
            humidity_pct: self.rh,
            screen_hours: self.screens,
            last_meal_hours: self.last_meal,
            earplugs: self.earplugs,
            streak_days: self.streak,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Use awakenings per night
    WakeCount,
    /// Use minutes awake after sleep onset
    WasoMinutes,
}

impl From<ModeArg> for ContinuityMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::WakeCount => ContinuityMode::WakeCount,
            ModeArg::WasoMinutes => ContinuityMode::WasoMinutes,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Single JSON record, or a JSON array of records
    Json,
    /// Newline-delimited JSON (one record per line)
    Ndjson,
}

#[derive(Clone, ValueEnum)]
enum SchemaType {
    /// Input record schema
    Input,
    /// Report schema
    Output,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), RecoveryCliError> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Score {
            input,
            input_format,
            output,
            format,
            strict,
            fields,
        } => {
            let config = load_config(config_path)?;
            cmd_score(
                &config,
                input.as_deref(),
                input_format,
                output.as_deref(),
                format,
                strict,
                &fields,
            )
        }

        Commands::Validate {
            input,
            input_format,
            json,
            fields,
        } => {
            let config = load_config(config_path)?;
            cmd_validate(&config, input.as_deref(), input_format, json, &fields)
        }

        Commands::Tiers { json } => cmd_tiers(json),

        Commands::Doctor { json } => cmd_doctor(config_path, json),

        Commands::Schema { schema_type } => cmd_schema(schema_type),
    }
}

fn load_config(explicit: Option<&Path>) -> Result<EngineConfig, RecoveryCliError> {
    let cwd = std::env::current_dir()?;
    Ok(EngineConfig::discover(explicit, &cwd)?)
}

/// Read records from a file or stdin, then apply flag overrides to each
fn read_records(
    input: Option<&Path>,
    input_format: InputFormat,
    fields: &FieldArgs,
) -> Result<Vec<InputRecord>, RecoveryCliError> {
    let overrides = fields.to_record();

    let Some(input) = input else {
        return Ok(vec![overrides]);
    };

    let input_data = if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    let records = match input_format {
        InputFormat::Ndjson => RecordAdapter::parse_ndjson(&input_data)?,
        InputFormat::Json if input_data.trim_start().starts_with('[') => {
            RecordAdapter::parse_array(&input_data)?
        }
        InputFormat::Json => vec![RecordAdapter::parse(&input_data)?],
    };

    if records.is_empty() {
        return Err(RecoveryCliError::NoRecords);
    }

    Ok(records
        .into_iter()
        .map(|record| overrides.clone().overlay(&record))
        .collect())
}

fn cmd_score(
    config: &EngineConfig,
    input: Option<&Path>,
    input_format: InputFormat,
    output: Option<&Path>,
    format: Option<OutputFormat>,
    strict: bool,
    fields: &FieldArgs,
) -> Result<(), RecoveryCliError> {
    let records = read_records(input, input_format, fields)?;
    let processor = RecoveryProcessor::with_defaults(config.defaults.clone());
    let encoder = ReportEncoder::new().with_options(config.output.encode_options());

    let mut reports: Vec<RecoveryReport> = Vec::with_capacity(records.len());
    for record in records {
        let input = processor.resolve(record)?;
        if strict {
            input.check_contract()?;
        } else {
            for violation in input.validate() {
                tracing::warn!(
                    field = %violation.field,
                    value = violation.value,
                    "input outside documented range"
                );
            }
        }
        let scores = RecoveryEngine::compute(&input)?;
        reports.push(encoder.encode(&input, &scores));
    }

    let format = format.unwrap_or(config.output.format);
    let output_data = format_output(&reports, format)?;

    match output {
        Some(path) => fs::write(path, output_data)?,
        None => {
            let mut stdout = io::stdout();
            write!(stdout, "{}", output_data)?;
            stdout.flush()?;
        }
    }

    Ok(())
}

fn cmd_validate(
    config: &EngineConfig,
    input: Option<&Path>,
    input_format: InputFormat,
    json: bool,
    fields: &FieldArgs,
) -> Result<(), RecoveryCliError> {
    let records = read_records(input, input_format, fields)?;
    let processor = RecoveryProcessor::with_defaults(config.defaults.clone());

    let mut errors: Vec<ValidationErrorDetail> = Vec::new();
    let mut invalid_records = 0;
    let total_records = records.len();

    for (index, record) in records.into_iter().enumerate() {
        let violations = match processor.resolve(record) {
            Ok(input) => input
                .validate()
                .into_iter()
                .map(|v| ValidationErrorDetail {
                    index,
                    field: v.field.clone(),
                    error: format!("value {} outside [{}, {}]", v.value, v.min, v.max),
                })
                .collect(),
            Err(e) => vec![ValidationErrorDetail {
                index,
                field: e.field().unwrap_or("record").to_string(),
                error: e.to_string(),
            }],
        };

        if !violations.is_empty() {
            invalid_records += 1;
            errors.extend(violations);
        }
    }

    let report = ValidationReport {
        total_records,
        valid_records: total_records - invalid_records,
        invalid_records,
        errors,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total records:   {}", report.total_records);
        println!("Valid records:   {}", report.valid_records);
        println!("Invalid records: {}", report.invalid_records);

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for err in &report.errors {
                println!("  - Record {} `{}`: {}", err.index, err.field, err.error);
            }
        }
    }

    if report.invalid_records > 0 {
        Err(RecoveryCliError::ValidationFailed(report.invalid_records))
    } else {
        Ok(())
    }
}

fn cmd_tiers(json: bool) -> Result<(), RecoveryCliError> {
    let mut tiers: Vec<(f64, Tier)> = TIER_THRESHOLDS.to_vec();
    tiers.push((0.0, Tier::Bronze));
    let mut levels: Vec<(u32, u8)> = LEVEL_THRESHOLDS
        .iter()
        .map(|(xp, level)| (*xp, level.number()))
        .collect();
    levels.push((0, 1));

    if json {
        let payload = serde_json::json!({
            "tiers": tiers
                .iter()
                .map(|(min, tier)| serde_json::json!({ "tier": tier, "min_score": min }))
                .collect::<Vec<_>>(),
            "levels": levels
                .iter()
                .map(|(min, level)| serde_json::json!({ "level": level, "min_xp": min }))
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!("Tiers");
        println!("=====");
        for (min, tier) in &tiers {
            println!("  {:<9} >= {:>4.1}", tier.as_str(), min);
        }
        println!("\nLevels");
        println!("======");
        for (min, level) in &levels {
            println!("  Level {}  >= {:>3} XP", level, min);
        }
    }

    Ok(())
}

fn cmd_doctor(explicit: Option<&Path>, json: bool) -> Result<(), RecoveryCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "version".to_string(),
        status: CheckStatus::Ok,
        message: format!("Recovery Flux version {}", FLUX_VERSION),
    });

    checks.push(DoctorCheck {
        name: "report_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("Report schema: {}", REPORT_VERSION),
    });

    let config_path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => std::env::current_dir().ok().map(|dir| default_path(&dir)),
    };
    let config_check = match config_path {
        Some(path) if path.exists() => match EngineConfig::load(&path) {
            Ok(_) => DoctorCheck {
                name: "config".to_string(),
                status: CheckStatus::Ok,
                message: format!("Config file valid: {}", path.display()),
            },
            Err(e) => DoctorCheck {
                name: "config".to_string(),
                status: CheckStatus::Error,
                message: e.to_string(),
            },
        },
        Some(path) if explicit.is_some() => DoctorCheck {
            name: "config".to_string(),
            status: CheckStatus::Error,
            message: format!("Config file does not exist: {}", path.display()),
        },
        _ => DoctorCheck {
            name: "config".to_string(),
            status: CheckStatus::Warning,
            message: "No config file found, using built-in defaults".to_string(),
        },
    };
    checks.push(config_check);

    let stdin_check = if atty::is(atty::Stream::Stdin) {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a TTY (interactive mode)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a pipe (ready for `score --input -`)".to_string(),
        }
    };
    checks.push(stdin_check);

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: FLUX_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Recovery Doctor Report");
        println!("======================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(RecoveryCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

fn cmd_schema(schema_type: SchemaType) -> Result<(), RecoveryCliError> {
    let schema = match schema_type {
        SchemaType::Input => input_json_schema(),
        SchemaType::Output => output_json_schema(),
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

// Helper functions

fn format_output(reports: &[RecoveryReport], format: OutputFormat) -> Result<String, RecoveryCliError> {
    match format {
        OutputFormat::Json => {
            let mut lines: Vec<String> = Vec::new();
            for report in reports {
                lines.push(serde_json::to_string(report)?);
            }
            Ok(lines.join("\n") + "\n")
        }
        OutputFormat::JsonPretty => match reports {
            [single] => Ok(serde_json::to_string_pretty(single)? + "\n"),
            _ => Ok(serde_json::to_string_pretty(reports)? + "\n"),
        },
        OutputFormat::Text => Ok(reports
            .iter()
            .map(render_text)
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

fn render_text(report: &RecoveryReport) -> String {
    let scores = &report.scores;
    let mut out = String::new();

    out.push_str("Recovery Report\n");
    out.push_str("===============\n");
    for (label, value, tier, gauge) in [
        ("CRI", scores.cri, scores.tiers.cri, scores.gauges.cri),
        ("MRI", scores.mri, scores.tiers.mri, scores.gauges.mri),
        ("Overall", scores.overall, scores.tiers.overall, scores.gauges.overall),
    ] {
        out.push_str(&format!(
            "{:<8} {:>5.1}  {:<9} ({})\n",
            label,
            value,
            tier.as_str(),
            gauge.as_str()
        ));
    }

    let progression = &scores.progression;
    out.push_str(&format!(
        "\nLevel {} ({} XP), streak {} days\n",
        progression.level.number(),
        progression.xp,
        progression.streak_days
    ));
    if !progression.quests.is_empty() {
        let quests: Vec<&str> = progression.quests.iter().map(|q| q.as_str()).collect();
        out.push_str(&format!("Quests: {}\n", quests.join(", ")));
    }

    if let Some(diagnostics) = &scores.diagnostics {
        let f = &diagnostics.factors;
        out.push_str(&format!(
            "\nFactors: qty {:.3}  sws {:.3}  rem {:.3}  cont {:.3} ({})  reg {:.3}\n",
            f.qty,
            f.sws,
            f.rem,
            f.cont,
            diagnostics.continuity_mode.as_str(),
            f.reg
        ));
        out.push_str(&format!(
            "Raw:     cri {:.4}  mri {:.4}  watch {:.3}\n",
            diagnostics.raw.cri_raw, diagnostics.raw.mri_raw, diagnostics.watch_scaled
        ));
    }

    if !report.suggestions.is_empty() {
        out.push_str("\nSuggestions:\n");
        for suggestion in &report.suggestions {
            out.push_str(&format!("  - {}\n", suggestion.message));
        }
    }

    out
}

fn input_json_schema() -> serde_json::Value {
    let number = |min: f64, max: f64, description: &str| {
        serde_json::json!({
            "type": "number",
            "minimum": min,
            "maximum": max,
            "description": description
        })
    };

    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "recovery.input_record.v1",
        "description": "Weekly-averaged sleep and environment record; omitted fields use defaults",
        "type": "object",
        "properties": {
            "total_sleep_hours": number(4.0, 10.0, "Total sleep time (alias: tst)"),
            "deep_sleep_hours": number(0.3, 3.0, "Slow-wave sleep (alias: sws)"),
            "rem_sleep_hours": number(0.3, 3.0, "REM sleep (alias: rem)"),
            "continuity_mode": {
                "type": "string",
                "enum": ["wake_count", "waso_minutes"],
                "description": "Selects which continuity reading is scored"
            },
            "waso_minutes": number(0.0, 180.0, "Wake after sleep onset (alias: waso)"),
            "wake_count": {
                "type": "integer",
                "minimum": 0,
                "maximum": 6,
                "description": "Awakenings per night (alias: wakes)"
            },
            "bedtime_sd_hours": number(0.0, 3.0, "Bedtime SD (alias: bt_sd)"),
            "wake_time_sd_hours": number(0.0, 3.0, "Wake-time SD (alias: wu_sd)"),
            "device_sleep_score": number(0.0, 100.0, "Device sleep score (alias: sleep_score)"),
            "temperature_c": number(15.0, 30.0, "Bedroom temperature (alias: temp)"),
            "humidity_pct": number(20.0, 80.0, "Relative humidity (alias: rh)"),
            "screen_hours": number(0.0, 4.0, "Screens after 9 PM (alias: screens)"),
            "last_meal_hours": number(0.0, 5.0, "Last meal before bed (alias: last_meal)"),
            "earplugs": { "type": "integer", "enum": [0, 1, 2] },
            "streak_days": { "type": "integer", "minimum": 0, "maximum": 365 }
        }
    })
}

fn output_json_schema() -> serde_json::Value {
    let index = serde_json::json!({
        "type": "object",
        "properties": {
            "cri": { "type": "string" },
            "mri": { "type": "string" },
            "overall": { "type": "string" }
        }
    });

    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "recovery.report.v1",
        "description": "Recovery Flux report",
        "type": "object",
        "required": ["report_version", "producer", "computed_at_utc", "input", "scores"],
        "properties": {
            "report_version": { "type": "string", "const": REPORT_VERSION },
            "producer": {
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "version": { "type": "string" },
                    "instance_id": { "type": "string", "format": "uuid" }
                }
            },
            "computed_at_utc": { "type": "string", "format": "date-time" },
            "input": { "type": "object" },
            "scores": {
                "type": "object",
                "required": ["cri", "mri", "overall", "tiers", "gauges", "progression"],
                "properties": {
                    "cri": { "type": "number", "minimum": 0, "maximum": 100 },
                    "mri": { "type": "number", "minimum": 0, "maximum": 100 },
                    "overall": { "type": "number", "minimum": 0, "maximum": 100 },
                    "tiers": index.clone(),
                    "gauges": index,
                    "progression": {
                        "type": "object",
                        "properties": {
                            "xp": { "type": "integer" },
                            "level": { "type": "string" },
                            "streak_days": { "type": "integer" },
                            "quests": { "type": "array", "items": { "type": "string" } }
                        }
                    },
                    "diagnostics": { "type": "object" }
                }
            },
            "suggestions": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "kind": { "type": "string" },
                        "message": { "type": "string" }
                    }
                }
            }
        }
    })
}

// Error types

#[derive(Debug)]
enum RecoveryCliError {
    Io(io::Error),
    Compute(ComputeError),
    Json(serde_json::Error),
    NoRecords,
    ValidationFailed(usize),
    DoctorFailed,
}

impl From<io::Error> for RecoveryCliError {
    fn from(e: io::Error) -> Self {
        RecoveryCliError::Io(e)
    }
}

impl From<ComputeError> for RecoveryCliError {
    fn from(e: ComputeError) -> Self {
        RecoveryCliError::Compute(e)
    }
}

impl From<serde_json::Error> for RecoveryCliError {
    fn from(e: serde_json::Error) -> Self {
        RecoveryCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<RecoveryCliError> for CliError {
    fn from(e: RecoveryCliError) -> Self {
        match e {
            RecoveryCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            RecoveryCliError::Compute(e) => {
                let (code, hint) = match &e {
                    ComputeError::InvalidInput { .. } => (
                        "INVALID_INPUT",
                        "Run 'recovery validate' or 'recovery schema input' for details",
                    ),
                    ComputeError::JsonError(_) => ("PARSE_ERROR", "Check JSON syntax"),
                    ComputeError::ConfigError(_) => {
                        ("CONFIG_ERROR", "Check the config file or pass --config")
                    }
                    ComputeError::EncodingError(_) => {
                        ("ENCODING_ERROR", "Report this as a bug")
                    }
                };
                CliError {
                    code: code.to_string(),
                    message: e.to_string(),
                    hint: Some(hint.to_string()),
                }
            }
            RecoveryCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            RecoveryCliError::NoRecords => CliError {
                code: "NO_RECORDS".to_string(),
                message: "No records found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            RecoveryCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} records failed validation", count),
                hint: Some("Fix out-of-range fields and retry".to_string()),
            },
            RecoveryCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    total_records: usize,
    valid_records: usize,
    invalid_records: usize,
    errors: Vec<ValidationErrorDetail>,
}

#[derive(serde::Serialize)]
struct ValidationErrorDetail {
    index: usize,
    field: String,
    error: String,
}

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}
