use console::Style;
use panoscope_core::config::ViewerConfig;
use panoscope_core::grid::PanoramaGeometry;

use crate::commands::replay::ReplayStats;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    warn: Style,
    disabled: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            warn: Style::new().yellow(),
            disabled: Style::new().dim().yellow(),
        }
    }
}

pub fn print_geometry(name: &str, geometry: &PanoramaGeometry, config: &ViewerConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to(name));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(name.chars().count().max(8))));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Image"),
        s.value.apply_to(format!("{}x{}", geometry.width, geometry.height))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Tile"),
        s.value.apply_to(format!("{}x{}", geometry.tile_width, geometry.tile_height))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Grid"),
        s.value.apply_to(format!(
            "{} rows x {} cols (+{} seam)",
            geometry.rows, geometry.cols, geometry.edge_cols
        ))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Extended"),
        s.value.apply_to(format!("{} px", geometry.extended_width()))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Display"),
        s.value.apply_to(format!("{}x{}", config.display.width, config.display.height))
    );
    if geometry.width % geometry.tile_width != 0 {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Seam"),
            s.warn.apply_to("partial last column")
        );
    }
    println!();
}

pub fn print_replay_summary(stats: &ReplayStats) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Replay"));
    println!("  {}", s.title.apply_to("\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}"));
    println!();

    println!("  {:<14}{}", s.label.apply_to("Panorama"), s.value.apply_to(&stats.panorama));
    println!(
        "  {:<14}{}",
        s.label.apply_to("Duration"),
        s.value.apply_to(format!("{:.2}s", stats.duration.as_secs_f64()))
    );
    println!("  {:<14}{}", s.label.apply_to("Samples"), s.value.apply_to(stats.samples));
    println!("  {:<14}{}", s.label.apply_to("Events"), s.value.apply_to(stats.events));
    println!(
        "  {:<14}{}",
        s.label.apply_to("Confirmed"),
        s.value.apply_to(stats.confirmations)
    );
    println!();

    println!("  {}", s.header.apply_to("Viewport"));
    println!("    {:<12}{}", s.label.apply_to("Fills"), s.value.apply_to(stats.cache.fills));
    println!("    {:<12}{}", s.label.apply_to("Shifts"), s.value.apply_to(stats.cache.shifts));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Fetched"),
        s.value.apply_to(stats.cache.tiles_fetched)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Reused"),
        s.value.apply_to(stats.cache.tiles_reused)
    );
    println!();

    println!("  {}", s.header.apply_to("Framing"));
    for (label, count) in [("Too high", stats.frames_too_high), ("Too low", stats.frames_too_low)] {
        if count == 0 {
            println!("    {:<12}{}", s.label.apply_to(label), s.disabled.apply_to("never"));
        } else {
            println!("    {:<12}{}", s.label.apply_to(label), s.warn.apply_to(format!("{count} frames")));
        }
    }
    if stats.switched_away {
        println!();
        println!("  {}", s.disabled.apply_to("Stopped at panorama switch"));
    }
    println!();
}
