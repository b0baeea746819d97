use anyhow::Context;
use clap::Parser;
use dapsi_tools::config::cli::{BodyArgs, Command, Unit};
use dapsi_tools::tools::finance::{debt, vat};
use dapsi_tools::tools::health::{calorie, ideal_weight, Body};
use dapsi_tools::tools::pdf::{self, extract, split};
use dapsi_tools::tools::text::{case, counter, fonts, hex};
use dapsi_tools::utils::output::{print_error, print_one};
use dapsi_tools::utils::logger;
use dapsi_tools::utils::validation::validate_required_field;
use dapsi_tools::{CliConfig, ToolError};
use std::path::Path;

fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(cli.command, cli.json) {
        match e.downcast_ref::<ToolError>() {
            Some(tool_error) => {
                tracing::error!(
                    "❌ {} (Category: {:?}, Severity: {:?})",
                    tool_error,
                    tool_error.category(),
                    tool_error.severity()
                );
                print_error(
                    cli.json,
                    &tool_error.user_friendly_message(),
                    tool_error.recovery_suggestion(),
                );
                std::process::exit(tool_error.exit_code());
            }
            None => {
                tracing::error!("❌ {:#}", e);
                print_error(cli.json, &format!("{:#}", e), "Run with --verbose for details");
                std::process::exit(3);
            }
        }
    }
}

fn body_from(args: &BodyArgs) -> Body {
    match args.unit {
        Unit::Metric => Body::metric(args.weight, args.height),
        Unit::Imperial => Body::imperial(args.weight, 0.0, args.height),
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}

fn read_pdf(path: &Path) -> anyhow::Result<Vec<u8>> {
    let bytes = std::fs::read(path)
        .map_err(ToolError::IoError)
        .with_context(|| format!("Reading {}", path.display()))?;
    pdf::validate_pdf(&path.to_string_lossy(), &bytes)?;
    Ok(bytes)
}

fn run(command: Command, json: bool) -> anyhow::Result<()> {
    match command {
        Command::Case { input, style } => {
            let text = input.read()?;
            match style {
                Some(style) => print_one(json, case::convert_case(&text, style), |s| s.clone()),
                None => {
                    let all: Vec<(String, String)> = case::CaseStyle::ALL
                        .iter()
                        .map(|&s| (s.label().to_string(), case::convert_case(&text, s)))
                        .collect();
                    print_one(json, all, |rows| {
                        rows.iter()
                            .map(|(label, value)| format!("{:<14} {}", label, value))
                            .collect::<Vec<_>>()
                            .join("\n")
                    })
                }
            }
        }

        Command::Count { input, top } => {
            let text = input.read()?;
            let stats = counter::count_text(&text);
            let report = serde_json::json!({
                "stats": stats,
                "keywords": counter::keyword_density(&text, top),
                "limits": counter::check_limits(&stats),
            });
            print_one(json, report, |_| {
                let mut lines = vec![
                    format!("Characters:          {}", stats.characters),
                    format!("Characters (no ws):  {}", stats.characters_no_spaces),
                    format!("Words:               {}", stats.words),
                    format!("Sentences:           {}", stats.sentences),
                    format!("Paragraphs:          {}", stats.paragraphs),
                    format!("Lines:               {}", stats.lines),
                    format!("Bytes:               {}", stats.bytes),
                    format!("Reading time:        {}s", stats.reading_time_secs),
                    format!("Speaking time:       {}s", stats.speaking_time_secs),
                ];
                for limit in counter::check_limits(&stats) {
                    let mark = if limit.within_limit { "✅" } else { "⚠️" };
                    lines.push(format!(
                        "{} {:<18} {} / {} ({} left)",
                        mark, limit.platform, stats.characters, limit.limit, limit.remaining
                    ));
                }
                lines.join("\n")
            })
        }

        Command::Font { input, style } => {
            let text = input.read()?;
            match style {
                Some(style) => print_one(json, fonts::stylize(&text, style), |s| s.clone()),
                None => print_one(json, fonts::stylize_all(&text), |all| {
                    all.iter()
                        .map(|styled| format!("{:<14} {}", styled.style, styled.text))
                        .collect::<Vec<_>>()
                        .join("\n")
                }),
            }
        }

        Command::Hex {
            input,
            encoding,
            decode,
            separator,
            uppercase,
            prefix,
        } => {
            let text = input.read()?;
            let output = if decode {
                hex::decode(text.trim(), encoding)?
            } else {
                let options = hex::EncodeOptions {
                    separator,
                    uppercase,
                    prefix,
                };
                hex::encode(&text, encoding, &options)
            };
            print_one(json, output, |s| s.clone())
        }

        Command::Debt {
            debts,
            extra,
            strategy,
            compare,
            schedule_csv,
        } => {
            let plan = debt::PayoffPlan {
                debts,
                extra_payment: extra,
                strategy,
            };

            let result = debt::simulate(&plan)?;
            if let Some(path) = &schedule_csv {
                let file = std::fs::File::create(path).map_err(ToolError::IoError)?;
                debt::write_schedule_csv(&result, file)?;
                tracing::info!("📁 Schedule saved to {}", path.display());
            }

            if compare {
                print_one(json, debt::compare(&plan)?, |c| {
                    format!(
                        "Avalanche: {} months, {:.2} interest\nSnowball:  {} months, {:.2} interest\nAvalanche saves {:.2}",
                        c.avalanche.months,
                        c.avalanche.total_interest,
                        c.snowball.months,
                        c.snowball.total_interest,
                        c.interest_saved_with_avalanche
                    )
                })
            } else {
                print_one(json, result, |r| {
                    let mut lines = vec![
                        format!("Debt free in {} months ({:?})", r.months, r.strategy),
                        format!("Total interest: {:.2}", r.total_interest),
                        format!("Total paid:     {:.2}", r.total_paid),
                    ];
                    for payoff in &r.payoff_order {
                        lines.push(format!(
                            "  month {:>3}: {} paid off",
                            payoff.month, payoff.name
                        ));
                    }
                    lines.join("\n")
                })
            }
        }

        Command::Vat {
            amount,
            rate,
            country,
            inclusive,
            gst_split,
            list,
        } => {
            if list {
                return print_one(json, vat::presets(), |presets| {
                    presets
                        .iter()
                        .map(|p| {
                            format!("{:<6} {:<22} {} {}%", p.code, p.country, p.tax_name, p.rate)
                        })
                        .collect::<Vec<_>>()
                        .join("\n")
                });
            }

            let amount = *validate_required_field("amount", &amount)?;
            let rate = match (rate, country.as_deref()) {
                (Some(rate), _) => rate,
                (None, Some(code)) => vat::preset_rate(code)?,
                (None, None) => {
                    return Err(ToolError::MissingInputError {
                        field: "rate or country".to_string(),
                    }
                    .into())
                }
            };

            let breakdown = if inclusive {
                vat::remove_tax(amount, rate)?
            } else {
                vat::add_tax(amount, rate)?
            };
            let gst = gst_split.then(|| vat::gst_split(&breakdown));
            let report = serde_json::json!({ "breakdown": breakdown, "gst_split": gst });

            print_one(json, report, |_| {
                let mut lines = vec![
                    format!("Net:   {:.2}", breakdown.net),
                    format!("Tax:   {:.2} ({}%)", breakdown.tax, breakdown.rate),
                    format!("Gross: {:.2}", breakdown.gross),
                ];
                if let Some(gst) = &gst {
                    lines.push(format!("CGST:  {:.2}", gst.cgst));
                    lines.push(format!("SGST:  {:.2}", gst.sgst));
                }
                lines.join("\n")
            })
        }

        Command::Calorie {
            age,
            sex,
            body,
            activity,
            formula,
        } => {
            let input = calorie::CalorieInput {
                age,
                sex,
                body: body_from(&body),
                activity,
                formula,
            };
            print_one(json, calorie::calculate(&input)?, |r| {
                let mut lines = vec![
                    format!("BMR:  {:.0} kcal", r.bmr),
                    format!("TDEE: {:.0} kcal", r.tdee),
                ];
                for goal in &r.goals {
                    let note = if goal.clamped { " (minimum)" } else { "" };
                    let name = format!("{:?}", goal.goal);
                    lines.push(format!("  {:<12} {:.0} kcal{}", name, goal.calories, note));
                }
                lines.push(format!(
                    "Macros: {:.0} g protein, {:.0} g carbs, {:.0} g fat",
                    r.macros.protein_g, r.macros.carbs_g, r.macros.fat_g
                ));
                lines.join("\n")
            })
        }

        Command::IdealWeight {
            sex,
            height,
            weight,
            unit,
        } => {
            let (height_cm, weight_kg) = match unit {
                Unit::Metric => (height, weight),
                Unit::Imperial => {
                    let body = Body::imperial(weight.unwrap_or(0.0), 0.0, height);
                    (body.height_cm, weight.map(|_| body.weight_kg))
                }
            };
            print_one(json, ideal_weight::calculate(sex, height_cm, weight_kg)?, |r| {
                let mut lines: Vec<String> = r
                    .formulas
                    .iter()
                    .map(|f| format!("{:<10} {:.1} kg", format!("{:?}", f.formula), f.weight_kg))
                    .collect();
                lines.push(format!("Average    {:.1} kg", r.average_kg));
                lines.push(format!(
                    "Healthy BMI range: {:.1} - {:.1} kg",
                    r.healthy_min_kg, r.healthy_max_kg
                ));
                if let Some(current) = &r.current {
                    lines.push(format!(
                        "Current: {:.1} kg, BMI {:.1}, {:+.1} kg from average",
                        current.weight_kg, current.bmi, current.difference_kg
                    ));
                }
                lines.join("\n")
            })
        }

        Command::PdfText { file, pages, output } => {
            let bytes = read_pdf(&file)?;
            let selection = pages.as_deref().map(split::parse_ranges).transpose()?;
            let document = extract::extract_text(&bytes, selection.as_deref())?;

            if let Some(path) = &output {
                std::fs::write(path, document.full_text()).map_err(ToolError::IoError)?;
                tracing::info!("📁 Text saved to {}", path.display());
            }
            print_one(json, document, |d| match &output {
                Some(path) => format!(
                    "Extracted {} words from {} pages to {}",
                    d.total_words,
                    d.pages.len(),
                    path.display()
                ),
                None => d.full_text(),
            })
        }

        Command::PdfSplit {
            file,
            mode,
            output_dir,
            zip,
        } => {
            let bytes = read_pdf(&file)?;
            let mode = mode.to_mode()?;
            let base_name = file_stem(&file);
            let outputs = split::split(&bytes, &mode, &base_name)?;

            std::fs::create_dir_all(&output_dir).map_err(ToolError::IoError)?;
            let written: Vec<String> = if zip {
                let archive = split::bundle_zip(&outputs)?;
                let path = output_dir.join(format!("{}_split.zip", base_name));
                std::fs::write(&path, archive).map_err(ToolError::IoError)?;
                vec![path.display().to_string()]
            } else {
                outputs
                    .iter()
                    .map(|out| {
                        let path = output_dir.join(&out.file_name);
                        std::fs::write(&path, &out.bytes).map_err(ToolError::IoError)?;
                        Ok(path.display().to_string())
                    })
                    .collect::<Result<_, ToolError>>()?
            };

            let report = serde_json::json!({ "outputs": outputs, "written": written });
            print_one(json, report, |_| {
                written
                    .iter()
                    .map(|path| format!("📁 {}", path))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }
    }
}
