/* ************************************************************************ **
** This file is part of lupfit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::FailResult;
use crate::config::ValidatedSettings;
use crate::input::{self, Samples, Source};

use lupfit_polyfit::Polynomial;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One coefficient per line, constant term first.
    Lines,
    Json,
}

#[derive(Debug, Clone)]
pub struct FitArgs {
    pub input: Source,
    pub settings: ValidatedSettings,
    pub format: OutputFormat,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct FitJson<'a> {
    degree: u32,
    coefficients: &'a Polynomial,
    // None when y has no variance
    r_squared: Option<f64>,
}

pub fn run_fit(args: &FitArgs, out: &mut dyn Write) -> FailResult<()> {
    let samples = input::read_samples(&args.input)?;
    info!("read {} samples from {}", samples.len(), args.input);
    let poly = fit_samples(&args.settings, &samples)?;
    write_fit(out, args.format, &poly, &samples)
}

pub(crate) fn fit_samples(settings: &ValidatedSettings, samples: &Samples) -> FailResult<Polynomial> {
    let poly = lupfit_polyfit::fit_with(&settings.fit_options(), &samples.x, &samples.y, settings.degree)?;
    info!("fitted: y = {}", poly);
    Ok(poly)
}

fn write_fit(out: &mut dyn Write, format: OutputFormat, poly: &Polynomial, samples: &Samples) -> FailResult<()> {
    match format {
        OutputFormat::Lines => {
            for c in poly.coefficients() {
                writeln!(out, "{}", c)?;
            }
        },
        OutputFormat::Json => {
            let r_squared = Some(poly.r_squared(&samples.x, &samples.y)).filter(|r| !r.is_nan());
            let json = FitJson { degree: poly.degree(), coefficients: poly, r_squared };
            ::serde_json::to_writer(&mut *out, &json)?;
            writeln!(out)?;
        },
    }
    out.flush()?;
    Ok(())
}
