use std::path::{Path, PathBuf};
use std::rc::Rc;

use workbench::app::Workbench;
use workbench::kernel::services::adapters::{
    load_settings, state_file_path, ComponentMatch, HeadlessCodeEditor, HeadlessDiffEditor,
    JsonFileStorage, LocalResourceProvider, LoggingCommandService, RecentFiles,
    StaticComponentRegistry,
};
use workbench::kernel::services::ports::{EditorComponent, RenderMode};
use workbench::kernel::services::WorkbenchServices;
use workbench::models::Uri;

mod logging;

fn main() -> std::io::Result<()> {
    let logging = logging::init();
    if let Some(guard) = &logging {
        eprintln!("logs: {}", guard.log_dir().display());
    }

    let cwd = std::env::current_dir()?;
    let paths: Vec<PathBuf> = std::env::args_os()
        .skip(1)
        .map(|arg| absolutize(&cwd, Path::new(&arg)))
        .collect();

    let settings = load_settings().unwrap_or_default();
    let state_path = state_file_path(&cwd)
        .unwrap_or_else(|| std::env::temp_dir().join("workbench").join("state.json"));
    let storage = JsonFileStorage::open(&state_path)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    let mut components = StaticComponentRegistry::new();
    components.register(
        EditorComponent::new("image-preview", RenderMode::OnePerResource),
        ComponentMatch::Extension("png".to_string()),
    );
    components.register(
        EditorComponent::new("settings", RenderMode::OnePerWorkbench),
        ComponentMatch::Scheme("settings".to_string()),
    );

    let services = WorkbenchServices::new(
        Rc::new(LocalResourceProvider::new()),
        Rc::new(components),
        Rc::new(storage),
        Rc::new(LoggingCommandService::new()),
        Rc::new(RecentFiles::new()),
    )
    .with_config(settings.workbench);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(Workbench::new(services), paths))
}

async fn run(workbench: Workbench, paths: Vec<PathBuf>) -> std::io::Result<()> {
    let _attach = workbench.events().group_created.subscribe(|group| {
        group.attach_code_editor(Rc::new(HeadlessCodeEditor::new()));
        group.attach_diff_editor(Rc::new(HeadlessDiffEditor::new()));
    });
    workbench.signal_contributions_ready();
    workbench.initialize().await;

    for path in &paths {
        let uri = Uri::from_path(path);
        if workbench.open(&uri, Default::default()).await.is_none() {
            eprintln!("cannot open {}", path.display());
        }
    }

    workbench.save_state();
    if let Some(state) = workbench.grid_state() {
        let json = serde_json::to_string_pretty(&state)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        println!("{}", json);
    }
    Ok(())
}

fn absolutize(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
