use rand::{SeedableRng, rngs::StdRng};
use tracing::info;
use tracing_subscriber::fmt;

use pot_srs::backend::ArkworksBn254;
use pot_srs::{
    BackendConfig, LagrangeEvaluations, PowersOfTau, SetupParameters,
    compute_lagrange_evaluations, dummy_powersoftau, is_well_formed,
};

const MAX_DEGREE: usize = 1 << 10;
const LAGRANGE_DEGREE: usize = 1 << 9;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    fmt()
        .with_max_level(tracing::Level::INFO)
        .with_span_events(fmt::format::FmtSpan::ENTER | fmt::format::FmtSpan::CLOSE)
        .with_target(false)
        .with_ansi(false)
        .init();

    let params = SetupParameters::new(MAX_DEGREE, Some(LAGRANGE_DEGREE), BackendConfig::default())?;
    params.backend.ensure_backend::<ArkworksBn254>()?;
    info!(config = %serde_json::to_string(&params)?, "setup parameters");

    // A real run would open the ceremony output here
    let mut rng = StdRng::seed_from_u64(42);
    let srs = dummy_powersoftau::<ArkworksBn254, _>(&mut rng, params.max_degree)?;
    let mut transcript = Vec::new();
    srs.store(&mut transcript)?;
    info!(bytes = transcript.len(), "transcript written");

    let loaded = PowersOfTau::<ArkworksBn254>::load(&mut transcript.as_slice(), params.max_degree)?;
    if !is_well_formed(&loaded) {
        return Err("transcript is not well-formed".into());
    }
    info!(degree = loaded.degree(), "transcript verified");

    let evals = compute_lagrange_evaluations(&loaded, params.lagrange_degree())?;
    if !evals.is_well_formed() {
        return Err("lagrange evaluations failed sanity check".into());
    }

    let mut cached = Vec::new();
    evals.write(&mut cached)?;
    let reloaded = LagrangeEvaluations::<ArkworksBn254>::read(&mut cached.as_slice())?;
    info!(
        degree = reloaded.degree(),
        bytes = cached.len(),
        round_trip = reloaded == evals,
        "lagrange evaluations cached"
    );

    Ok(())
}
