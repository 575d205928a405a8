// SPDX-License-Identifier: MPL-2.0
//! Headless demo: tours the whole catalog against a scripted surface and
//! logs every state transition. Useful for exercising a catalog file before
//! wiring the controller into a real embedding.

use model_carousel::{config, Catalog, HeadlessSurface, Input, Viewer};
use std::path::PathBuf;

fn main() -> model_carousel::Result<()> {
    env_logger::init();

    let mut args = pico_args::Arguments::from_env();
    let catalog_path: Option<PathBuf> = args.opt_value_from_str("--catalog").unwrap();
    let config_path: Option<PathBuf> = args.opt_value_from_str("--config").unwrap();

    let config = match config_path {
        Some(path) => config::load_from_path(&path)?,
        None => config::load()?,
    };
    let catalog = match catalog_path {
        Some(path) => Catalog::load_from_path(&path)?,
        None => Catalog::sample(),
    };

    let mut viewer = Viewer::new(catalog, HeadlessSurface::completing(), config.viewer_options())?;

    // Walk the carousel once around, playing each model briefly.
    let stops = viewer.catalog().len();
    for _ in 0..stops {
        viewer.pump_events();
        let info = viewer.gallery_info();
        log::info!(
            "{} - {} [{:?}]",
            info.position_caption(),
            info.title,
            info.load_phase
        );
        viewer.apply(Input::ToggleAnimation)?;
        viewer.apply(Input::ResetCamera)?;
        viewer.apply(Input::Next)?;
    }
    viewer.pump_events();
    log::info!("tour finished back on {}", viewer.gallery_info().title);
    Ok(())
}
