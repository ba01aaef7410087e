//! Fakes and a harness shared by the engine tests.

use rustc_hash::{FxHashMap, FxHashSet};
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use crate::app::Workbench;
use crate::core::Subscription;
use crate::kernel::group::EditorGroup;
use crate::kernel::services::adapters::{
    ComponentMatch, HeadlessCodeEditor, HeadlessDiffEditor, LoggingCommandService, MemoryStorage,
    RecentFiles, StaticComponentRegistry,
};
use crate::kernel::services::ports::{
    ComponentRegistry, EditorComponent, LocalBoxFuture, RenderMode, ResourceProvider,
    WorkbenchConfig,
};
use crate::kernel::services::WorkbenchServices;
use crate::models::{OpenType, Resource, Uri};

pub fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

pub fn uri(raw: &str) -> Uri {
    Uri::parse(raw).unwrap()
}

/// Resolves every URI except the ones marked missing. `diff://` URIs carry
/// `git://` / `file://` sides. Both calls yield once so concurrent callers
/// interleave.
#[derive(Default)]
pub struct FakeResources {
    fetches: RefCell<Vec<Uri>>,
    missing: RefCell<FxHashSet<Uri>>,
    refused: RefCell<FxHashSet<Uri>>,
}

impl FakeResources {
    pub fn fetch_count(&self, uri: &Uri) -> usize {
        self.fetches.borrow().iter().filter(|u| *u == uri).count()
    }

    pub fn total_fetches(&self) -> usize {
        self.fetches.borrow().len()
    }

    pub fn set_missing(&self, uri: &Uri) {
        self.missing.borrow_mut().insert(uri.clone());
    }

    pub fn refuse_close(&self, uri: &Uri) {
        self.refused.borrow_mut().insert(uri.clone());
    }

    pub fn allow_close(&self, uri: &Uri) {
        self.refused.borrow_mut().remove(uri);
    }
}

impl ResourceProvider for FakeResources {
    fn get_resource<'a>(&'a self, uri: &'a Uri) -> LocalBoxFuture<'a, Option<Resource>> {
        Box::pin(async move {
            self.fetches.borrow_mut().push(uri.clone());
            tokio::task::yield_now().await;
            if self.missing.borrow().contains(uri) {
                return None;
            }
            if uri.scheme() == "diff" {
                let path = uri.path();
                return Some(Resource::diff(
                    uri.clone(),
                    Uri::parse(&format!("git://{}", path)).unwrap(),
                    Uri::parse(&format!("file://{}", path)).unwrap(),
                ));
            }
            Some(Resource::new(uri.clone()))
        })
    }

    fn should_close_resource<'a>(
        &'a self,
        resource: &'a Resource,
        _open_lists: &'a [Vec<Rc<Resource>>],
    ) -> LocalBoxFuture<'a, bool> {
        Box::pin(async move {
            tokio::task::yield_now().await;
            !self.refused.borrow().contains(&resource.uri)
        })
    }
}

/// The static registry below, with per-URI overrides and a resolve counter.
pub struct FakeComponents {
    registry: StaticComponentRegistry,
    overrides: RefCell<FxHashMap<Uri, Vec<OpenType>>>,
    resolves: RefCell<Vec<Uri>>,
}

impl FakeComponents {
    pub fn new() -> Self {
        let mut registry = StaticComponentRegistry::new();
        registry.register(
            EditorComponent::new("preview", RenderMode::OnePerResource),
            ComponentMatch::Extension("md".to_string()),
        );
        registry.register(
            EditorComponent::new("panel", RenderMode::OnePerGroup),
            ComponentMatch::Scheme("panel".to_string()),
        );
        registry.register(
            EditorComponent::new("settings", RenderMode::OnePerWorkbench),
            ComponentMatch::Scheme("settings".to_string()),
        );
        Self {
            registry,
            overrides: RefCell::new(FxHashMap::default()),
            resolves: RefCell::new(Vec::new()),
        }
    }

    pub fn set_open_types(&self, uri: &Uri, open_types: Vec<OpenType>) {
        self.overrides.borrow_mut().insert(uri.clone(), open_types);
    }

    pub fn resolve_count(&self, uri: &Uri) -> usize {
        self.resolves.borrow().iter().filter(|u| *u == uri).count()
    }
}

impl ComponentRegistry for FakeComponents {
    fn resolve_editor_component<'a>(
        &'a self,
        resource: &'a Resource,
    ) -> LocalBoxFuture<'a, Vec<OpenType>> {
        self.resolves.borrow_mut().push(resource.uri.clone());
        let open_types = self
            .overrides
            .borrow()
            .get(&resource.uri)
            .cloned()
            .unwrap_or_else(|| self.registry.open_types_for(resource));
        Box::pin(async move { open_types })
    }

    fn get_editor_component(&self, id: &str) -> Option<EditorComponent> {
        self.registry.get_editor_component(id)
    }
}

type EditorsByGroup<E> = Rc<RefCell<Vec<(String, Rc<E>)>>>;

pub struct Harness {
    pub workbench: Workbench,
    pub resources: Rc<FakeResources>,
    pub components: Rc<FakeComponents>,
    pub commands: Rc<LoggingCommandService>,
    pub storage: Rc<MemoryStorage>,
    pub recent: Rc<RecentFiles>,
    code_editors: EditorsByGroup<HeadlessCodeEditor>,
    diff_editors: EditorsByGroup<HeadlessDiffEditor>,
    _attach: Option<Subscription>,
}

impl Harness {
    /// Editors attach to every new group; contributions are signalled.
    pub fn new() -> Self {
        Self::build(Rc::new(MemoryStorage::new()), WorkbenchConfig::default(), true)
    }

    pub fn with_storage(storage: Rc<MemoryStorage>) -> Self {
        Self::build(storage, WorkbenchConfig::default(), true)
    }

    pub fn with_config(config: WorkbenchConfig) -> Self {
        Self::build(Rc::new(MemoryStorage::new()), config, true)
    }

    /// Groups start without native editors.
    pub fn without_editors() -> Self {
        Self::build(Rc::new(MemoryStorage::new()), WorkbenchConfig::default(), false)
    }

    fn build(storage: Rc<MemoryStorage>, config: WorkbenchConfig, attach: bool) -> Self {
        let resources = Rc::new(FakeResources::default());
        let components = Rc::new(FakeComponents::new());
        let commands = Rc::new(LoggingCommandService::new());
        let recent = Rc::new(RecentFiles::new());
        let services = WorkbenchServices::new(
            resources.clone(),
            components.clone(),
            storage.clone(),
            commands.clone(),
            recent.clone(),
        )
        .with_config(config);
        let workbench = Workbench::new(services);

        let code_editors: EditorsByGroup<HeadlessCodeEditor> = Rc::default();
        let diff_editors: EditorsByGroup<HeadlessDiffEditor> = Rc::default();
        let attach = attach.then(|| {
            let code_editors = code_editors.clone();
            let diff_editors = diff_editors.clone();
            workbench.events().group_created.subscribe(move |group| {
                let code = Rc::new(HeadlessCodeEditor::new());
                let diff = Rc::new(HeadlessDiffEditor::new());
                group.attach_code_editor(code.clone());
                group.attach_diff_editor(diff.clone());
                code_editors
                    .borrow_mut()
                    .push((group.name().to_string(), code));
                diff_editors
                    .borrow_mut()
                    .push((group.name().to_string(), diff));
            })
        });
        workbench.signal_contributions_ready();

        Self {
            workbench,
            resources,
            components,
            commands,
            storage,
            recent,
            code_editors,
            diff_editors,
            _attach: attach,
        }
    }

    pub async fn start(&self) -> EditorGroup {
        self.workbench.initialize().await;
        self.workbench.current_group().unwrap()
    }

    pub fn code_editor(&self, group: &EditorGroup) -> Rc<HeadlessCodeEditor> {
        self.code_editors
            .borrow()
            .iter()
            .find(|(name, _)| name == group.name())
            .map(|(_, editor)| editor.clone())
            .unwrap()
    }

    pub fn diff_editor(&self, group: &EditorGroup) -> Rc<HeadlessDiffEditor> {
        self.diff_editors
            .borrow()
            .iter()
            .find(|(name, _)| name == group.name())
            .map(|(_, editor)| editor.clone())
            .unwrap()
    }

    /// URIs passed to `command`, in dispatch order.
    pub fn command_uris(&self, command: &str) -> Vec<Option<Uri>> {
        self.commands
            .history()
            .into_iter()
            .filter(|(name, _)| name == command)
            .map(|(_, uri)| uri)
            .collect()
    }
}

pub fn tab_names(group: &EditorGroup) -> Vec<String> {
    group.resources().iter().map(|r| r.name.clone()).collect()
}

pub fn current_name(group: &EditorGroup) -> Option<String> {
    group.current_resource().map(|r| r.name.clone())
}
