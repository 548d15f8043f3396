use preempt_solver::SolverConfig;

pub fn show(config: &SolverConfig) -> anyhow::Result<()> {
    print!("{}", config.to_toml_string()?);
    Ok(())
}
