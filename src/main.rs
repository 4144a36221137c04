use std::time::Instant;

use anyhow::{Context, Result};
use d2q9_bgk::obstacles::load_obstacles;
use d2q9_bgk::output::{format_sci, save_av_vels, save_final_state, AV_VELS_FILE, FINAL_STATE_FILE};
use d2q9_bgk::{Params, Simulation};

fn usage(exe: &str) -> ! {
    eprintln!("Usage: {} <paramfile> <obstaclefile>", exe);
    std::process::exit(1);
}

pub fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let (param_file, obstacle_file) = match args.as_slice() {
        [_, param_file, obstacle_file] => (param_file, obstacle_file),
        _ => usage(args.first().map(String::as_str).unwrap_or("d2q9-bgk")),
    };

    let init_tic = Instant::now();
    let params = Params::load(param_file)
        .with_context(|| format!("could not load input parameter file: {}", param_file))?;
    let obstacles = load_obstacles(obstacle_file, params.nx, params.ny)
        .with_context(|| format!("could not load input obstacles file: {}", obstacle_file))?;
    let mut sim = Simulation::new(params, &obstacles)?;
    let init_time = init_tic.elapsed();

    let comp_tic = Instant::now();
    let av_vels = sim.run()?;
    let comp_time = comp_tic.elapsed();
    let tot_time = init_tic.elapsed();

    println!("==done==");
    println!("Reynolds number:\t\t{}", format_sci(sim.reynolds_number()));
    println!("Elapsed Init time:\t\t\t{:.6} (s)", init_time.as_secs_f64());
    println!("Elapsed Compute time:\t\t\t{:.6} (s)", comp_time.as_secs_f64());
    println!("Elapsed Total time:\t\t\t{:.6} (s)", tot_time.as_secs_f64());

    save_final_state(FINAL_STATE_FILE, &sim.final_state())
        .with_context(|| format!("could not write {}", FINAL_STATE_FILE))?;
    save_av_vels(AV_VELS_FILE, &av_vels).with_context(|| format!("could not write {}", AV_VELS_FILE))?;

    Ok(())
}
