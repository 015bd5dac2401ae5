//! Headless Nakladka driver.
//!
//! Manages the templates saved in the default template directory and prints
//! the render parameters a template resolves to.
//!
//! ```text
//! nakladka list
//! nakladka show <name> [<layout-width> <layout-height>]
//! nakladka delete <name>
//! ```
//!
//! Set `NAKLADKA_CONFIG` to a JSON file to override editor defaults.

use kurbo::{Point, Size};
use nakladka_core::{
    Editor, EditorConfig, FileStorage, OverlayLayout, RenderState, TemplateStore,
};
use std::error::Error;
use std::process::ExitCode;

const USAGE: &str = "usage: nakladka <list | show <name> [<width> <height>] | delete <name>>";

fn load_config() -> Result<EditorConfig, Box<dyn Error>> {
    match std::env::var_os("NAKLADKA_CONFIG") {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            log::info!("Loaded config from {}", path.to_string_lossy());
            Ok(EditorConfig::from_json(&json)?)
        }
        None => Ok(EditorConfig::default()),
    }
}

fn print_render(name: &str, editor: &Editor, render: &RenderState) {
    println!("template:          {}", name);
    println!("shape:             {}", render.overlay_class);
    if let Some(size) = render.container_size {
        println!("container:         {}x{}", size.width, size.height);
    }
    if let Some(size) = render.overlay_size {
        println!("overlay size:      {}x{}", size.width, size.height);
    }
    println!("overlay transform: {}", render.overlay_transform);
    println!("border:            {} {}", render.border_width, render.border_color);
    println!("image transform:   {}", render.overlay_image_transform);
    println!("main transform:    {}", render.main_image_transform);
    match &render.shadow {
        Some(shadow) => {
            println!(
                "shadow box:        {} x {} at ({}, {})",
                shadow.width, shadow.height, shadow.left, shadow.top
            );
            println!("shadow transform:  {}", shadow.transform);
            println!("shadow paint:      {} {}", shadow.background, shadow.filter);
        }
        None => println!("shadow:            off"),
    }
    println!("export file:       {}", editor.editor_size().export_file_name());
}

fn run(args: &[String]) -> Result<(), Box<dyn Error>> {
    let storage = FileStorage::default_location()?;
    log::debug!("Template directory: {}", storage.base_path().display());
    let mut store = TemplateStore::open(storage)?;

    match args {
        [cmd] if cmd == "list" => {
            for name in store.list() {
                println!("{}", name);
            }
        }
        [cmd, name, rest @ ..] if cmd == "show" => {
            let mut editor = Editor::new(load_config()?);
            if let [width, height] = rest {
                editor.set_layout(OverlayLayout {
                    origin: Point::ZERO,
                    fixed_footprint: Size::new(width.parse()?, height.parse()?),
                });
            }
            editor.load_template(&store, name)?;
            print_render(name, &editor, &editor.render());
        }
        [cmd, name] if cmd == "delete" => {
            store.delete(name)?;
            println!("deleted {}", name);
        }
        _ => return Err(USAGE.into()),
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
