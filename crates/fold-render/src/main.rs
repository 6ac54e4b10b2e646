mod args;
mod faces;
mod render;

use std::env;

fn main() {
    // completion script output, and exit
    args::if_print_completion_and_exit();

    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    env_logger::init();

    let cli = args::get_args();

    config::set_config_path(cli.config_path.as_deref());

    match &cli.command {
        args::Command::Schema => {
            if let Err(e) = config::output_json_schema() {
                log::error!("failed to print schema: {e}");
                std::process::exit(1);
            }
        }
        args::Command::Render {
            direction,
            out,
            realtime,
        } => {
            let conf = match config::get_config_root() {
                Ok(c) => c,
                Err(e) => {
                    log::warn!("{e}, using default configuration");
                    config::FoldConfig::default()
                }
            };
            let opts = render::RenderOptions {
                direction: *direction,
                out: out.clone(),
                realtime: *realtime,
                mouse_debug: cli.mouse_debug,
            };
            match render::run(&conf, &opts) {
                Ok(n) => log::info!("wrote {n} frames to {}", out.display()),
                Err(e) => {
                    log::error!("render failed: {e}");
                    std::process::exit(1);
                }
            }
        }
    }
}
