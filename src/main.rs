use std::path::PathBuf;

use tee_nameplates::{default_config_path, load_config_or_default, run_client};

fn main() {
    let command = clap::Command::new("tee-nameplates")
        .arg(
            clap::Arg::new("config")
                .long("config")
                .help("Path to config.toml")
                .takes_value(true),
        )
        .arg(
            clap::Arg::new("players")
                .long("players")
                .help("Number of simulated players, including the local player and dummy")
                .takes_value(true),
        )
        .arg(
            clap::Arg::new("seed")
                .long("seed")
                .help("Seed for the simulated players")
                .takes_value(true),
        )
        .arg(
            clap::Arg::new("demo-playback")
                .long("demo-playback")
                .help("Simulate demo playback instead of an online session"),
        )
        .arg(
            clap::Arg::new("name-plate-sprites")
                .long("name-plate-sprites")
                .help("Asset directory containing name plate icon textures")
                .takes_value(true),
        )
        .arg(
            clap::Arg::new("disable-vsync")
                .long("disable-vsync")
                .help("Disable v-sync to see accurate frame times"),
        );
    let matches = command.get_matches();

    let config_path = matches
        .value_of("config")
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);
    let mut config = load_config_or_default(&config_path);

    if let Some(players) = matches
        .value_of("players")
        .and_then(|x| x.parse::<usize>().ok())
    {
        config.demo.players = players;
    }

    if let Some(seed) = matches
        .value_of("seed")
        .and_then(|x| x.parse::<u64>().ok())
    {
        config.demo.seed = Some(seed);
    }

    if matches.is_present("demo-playback") {
        config.demo.demo_playback = true;
    }

    if let Some(directory) = matches.value_of("name-plate-sprites") {
        config.graphics.name_plate_sprites = Some(directory.to_string());
    }

    if matches.is_present("disable-vsync") {
        config.graphics.disable_vsync = true;
    }

    run_client(config);
}
