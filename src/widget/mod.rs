use std::cell::RefCell;
use std::rc::Rc;

use crate::file::{CommittedFile, SelectedFile, UploadTarget};
use crate::preview::{build_preview, ObjectUrl, ObjectUrlRegistry, PreviewImage};
use crate::session::{SessionHooks, SessionManager, SessionResult, SessionToken};
use crate::validate::{validate_selection, RejectReason, SelectionOutcome, SUPPORTED_IMAGE_TYPES};

/// Capability bundle over the host-owned controls of one trigger widget.
/// The widget only reads and mutates their visible state; it never owns
/// their identity. Preview affordances are optional; hosts without them keep
/// the default no-op implementations.
pub trait WidgetControls {
    /// Reset the backing file input's value.
    fn reset_input_value(&mut self);
    /// Install dropped files into the backing input before re-validation.
    fn install_files(&mut self, files: &[SelectedFile]);
    /// Install the MIME accept list on the backing input.
    fn set_accept_types(&mut self, mime_types: &str);
    fn set_file_name(&mut self, name: &str);
    fn show_error(&mut self, message: &str);
    fn hide_error(&mut self);
    fn set_clear_visible(&mut self, visible: bool);
    fn set_upload_visible(&mut self, visible: bool);
    fn supports_preview(&self) -> bool {
        false
    }
    fn show_preview(&mut self, _preview: &PreviewImage) {}
    fn hide_preview(&mut self) {}
}

fn accept_attribute() -> String {
    SUPPORTED_IMAGE_TYPES.join(",")
}

/// Upload widget for flows with no editing step: preview the accepted file
/// and wait for the caller's separate commit.
pub struct UploadWidget<C: WidgetControls> {
    controls: Rc<RefCell<C>>,
    max_upload_mib: u32,
    registry: ObjectUrlRegistry,
    current_preview: Option<ObjectUrl>,
    closed: bool,
}

impl<C: WidgetControls> UploadWidget<C> {
    pub fn build(controls: Rc<RefCell<C>>, max_upload_mib: u32) -> Self {
        controls.borrow_mut().set_accept_types(&accept_attribute());
        Self {
            controls,
            max_upload_mib,
            registry: ObjectUrlRegistry::new(),
            current_preview: None,
            closed: false,
        }
    }

    /// Entry point for a file-input change event.
    pub fn handle_selection(&mut self, files: &[SelectedFile]) {
        debug_assert!(!self.closed, "handle_selection on a closed upload widget");
        match validate_selection(files, self.max_upload_mib) {
            SelectionOutcome::NoSelection => {
                self.controls.borrow_mut().hide_error();
            }
            SelectionOutcome::Rejected(RejectReason::TooManyFiles) => {
                // Prior accepted state stays untouched.
                self.controls
                    .borrow_mut()
                    .show_error(&RejectReason::TooManyFiles.to_string());
            }
            SelectionOutcome::Rejected(reason) => {
                self.controls.borrow_mut().show_error(&reason.to_string());
                self.clear();
            }
            SelectionOutcome::Accepted(file) => self.accept(&file),
        }
    }

    /// A drop on the upload affordance is the same as a change event once the
    /// files are installed into the backing input. Zero-file drops are
    /// ignored, not errors.
    pub fn handle_drop(&mut self, files: &[SelectedFile]) {
        debug_assert!(!self.closed, "handle_drop on a closed upload widget");
        if files.is_empty() {
            return;
        }
        self.controls.borrow_mut().install_files(files);
        self.handle_selection(files);
    }

    fn accept(&mut self, file: &SelectedFile) {
        tracing::debug!(file = %file.name, size = file.size_bytes(), "upload widget accepted file");
        let mut controls = self.controls.borrow_mut();
        controls.set_file_name(&file.name);
        controls.hide_error();
        controls.set_clear_visible(true);
        controls.set_upload_visible(false);
        if controls.supports_preview() {
            if let Some(previous) = self.current_preview.take() {
                self.registry.revoke(&previous);
            }
            let preview = build_preview(&mut self.registry, file);
            controls.show_preview(&preview);
            self.current_preview = Some(preview.url);
        }
    }

    /// Reset to the no-file-chosen state. Idempotent. Does not touch the
    /// error text; rejections render their message and then clear.
    pub fn clear(&mut self) {
        let mut controls = self.controls.borrow_mut();
        controls.reset_input_value();
        controls.set_file_name("");
        controls.set_clear_visible(false);
        controls.set_upload_visible(true);
        controls.hide_preview();
        drop(controls);
        if let Some(previous) = self.current_preview.take() {
            self.registry.revoke(&previous);
        }
    }

    /// Final teardown: clear, then release the bindings. At most once per
    /// built instance; operations on a closed widget are caller bugs.
    pub fn close(&mut self) {
        debug_assert!(!self.closed, "close called twice on upload widget");
        self.clear();
        self.closed = true;
    }
}

#[cfg(test)]
impl<C: WidgetControls> UploadWidget<C> {
    fn live_preview_count(&self) -> usize {
        self.registry.live_count()
    }
}

/// Trigger widget for the editing flow: validation feeds straight into a
/// shared-editor session instead of a local preview.
pub struct DirectUploadWidget<C: WidgetControls> {
    controls: Rc<RefCell<C>>,
    manager: Rc<RefCell<SessionManager>>,
    target: UploadTarget,
    commit: Rc<RefCell<Box<dyn FnMut(CommittedFile, UploadTarget)>>>,
    max_upload_mib: u32,
}

impl<C: WidgetControls + 'static> DirectUploadWidget<C> {
    pub fn build(
        controls: Rc<RefCell<C>>,
        manager: Rc<RefCell<SessionManager>>,
        target: UploadTarget,
        commit: impl FnMut(CommittedFile, UploadTarget) + 'static,
        max_upload_mib: u32,
    ) -> Self {
        controls.borrow_mut().set_accept_types(&accept_attribute());
        Self {
            controls,
            manager,
            target,
            commit: Rc::new(RefCell::new(Box::new(commit))),
            max_upload_mib,
        }
    }

    pub fn target(&self) -> UploadTarget {
        self.target
    }

    /// Change-event entry point. An accepted file starts an edit session and
    /// yields its token so the host can route editor completion/cancel events.
    pub fn handle_selection(
        &mut self,
        files: &[SelectedFile],
    ) -> SessionResult<Option<SessionToken>> {
        match validate_selection(files, self.max_upload_mib) {
            SelectionOutcome::NoSelection => {
                self.controls.borrow_mut().hide_error();
                Ok(None)
            }
            SelectionOutcome::Rejected(RejectReason::TooManyFiles) => {
                self.controls
                    .borrow_mut()
                    .show_error(&RejectReason::TooManyFiles.to_string());
                Ok(None)
            }
            SelectionOutcome::Rejected(reason) => {
                let mut controls = self.controls.borrow_mut();
                controls.show_error(&reason.to_string());
                controls.reset_input_value();
                Ok(None)
            }
            SelectionOutcome::Accepted(file) => {
                self.controls.borrow_mut().hide_error();
                let token = self
                    .manager
                    .borrow_mut()
                    .start_session(self.target, file, self.session_hooks())?;
                Ok(Some(token))
            }
        }
    }

    pub fn handle_drop(&mut self, files: &[SelectedFile]) -> SessionResult<Option<SessionToken>> {
        if files.is_empty() {
            return Ok(None);
        }
        self.controls.borrow_mut().install_files(files);
        self.handle_selection(files)
    }

    fn session_hooks(&self) -> SessionHooks {
        let commit = Rc::clone(&self.commit);
        let controls = Rc::clone(&self.controls);
        SessionHooks {
            commit: Box::new(move |file, target| (commit.borrow_mut())(file, target)),
            reset_input: Box::new(move || controls.borrow_mut().reset_input_value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{EditorOptions, EditorSurface};
    use crate::file::EditedResult;
    use crate::modal::ModalHost;
    use crate::session::EditorFactory;
    use crate::theme::EditorTheme;

    #[derive(Debug, Default)]
    struct MockControls {
        with_preview: bool,
        accept_types: String,
        file_name: String,
        error: Option<String>,
        clear_visible: bool,
        upload_visible: bool,
        preview: Option<PreviewImage>,
        input_resets: usize,
        installed: usize,
    }

    impl MockControls {
        fn with_preview() -> Self {
            Self {
                with_preview: true,
                upload_visible: true,
                ..Self::default()
            }
        }

        fn plain() -> Self {
            Self {
                upload_visible: true,
                ..Self::default()
            }
        }
    }

    impl WidgetControls for MockControls {
        fn reset_input_value(&mut self) {
            self.input_resets += 1;
        }

        fn install_files(&mut self, files: &[SelectedFile]) {
            self.installed += files.len();
        }

        fn set_accept_types(&mut self, mime_types: &str) {
            self.accept_types = mime_types.to_owned();
        }

        fn set_file_name(&mut self, name: &str) {
            self.file_name = name.to_owned();
        }

        fn show_error(&mut self, message: &str) {
            self.error = Some(message.to_owned());
        }

        fn hide_error(&mut self) {
            self.error = None;
        }

        fn set_clear_visible(&mut self, visible: bool) {
            self.clear_visible = visible;
        }

        fn set_upload_visible(&mut self, visible: bool) {
            self.upload_visible = visible;
        }

        fn supports_preview(&self) -> bool {
            self.with_preview
        }

        fn show_preview(&mut self, preview: &PreviewImage) {
            self.preview = Some(preview.clone());
        }

        fn hide_preview(&mut self) {
            self.preview = None;
        }
    }

    fn png(name: &str, size: usize) -> SelectedFile {
        SelectedFile::new(name, Some("image/png"), vec![0_u8; size])
    }

    fn jpeg(name: &str, size: usize) -> SelectedFile {
        SelectedFile::new(name, Some("image/jpeg"), vec![0_u8; size])
    }

    fn widget() -> (UploadWidget<MockControls>, Rc<RefCell<MockControls>>) {
        let controls = Rc::new(RefCell::new(MockControls::with_preview()));
        (UploadWidget::build(controls.clone(), 5), controls)
    }

    #[test]
    fn build_installs_the_accept_list() {
        let (_widget, controls) = widget();
        let accept = controls.borrow().accept_types.clone();
        assert!(accept.contains("image/png"));
        assert!(accept.contains("image/avif"));
        assert_eq!(accept.split(',').count(), SUPPORTED_IMAGE_TYPES.len());
    }

    #[test]
    fn accepting_a_small_png_shows_name_and_preview() {
        let (mut widget, controls) = widget();
        widget.handle_selection(&[png("team.png", 2 * 1024 * 1024)]);

        let controls = controls.borrow();
        assert_eq!(controls.file_name, "team.png");
        assert!(controls.error.is_none());
        assert!(controls.clear_visible);
        assert!(!controls.upload_visible);
        let preview = controls.preview.as_ref().expect("preview should be shown");
        assert!(!preview.url.as_str().is_empty());
    }

    #[test]
    fn oversized_jpeg_is_rejected_with_the_ceiling_in_the_message() {
        let (mut widget, controls) = widget();
        widget.handle_selection(&[jpeg("big.jpg", 6 * 1024 * 1024)]);

        let controls = controls.borrow();
        let error = controls.error.as_ref().expect("error should be shown");
        assert!(error.contains('5'), "message should name the ceiling: {error}");
        assert!(!controls.clear_visible);
        assert_eq!(controls.file_name, "");
        assert!(controls.upload_visible);
    }

    #[test]
    fn unsupported_type_clears_prior_accepted_state() {
        let (mut widget, controls) = widget();
        widget.handle_selection(&[png("ok.png", 100)]);
        widget.handle_selection(&[SelectedFile::new("doc.pdf", Some("application/pdf"), vec![0; 10])]);

        let controls = controls.borrow();
        assert_eq!(controls.error.as_deref(), Some("File type is not supported."));
        assert_eq!(controls.file_name, "");
        assert!(!controls.clear_visible);
        assert!(controls.preview.is_none());
    }

    #[test]
    fn too_many_files_preserves_prior_accepted_state() {
        let (mut widget, controls) = widget();
        widget.handle_selection(&[png("keep.png", 100)]);
        widget.handle_selection(&[png("a.png", 10), png("b.png", 10)]);

        let controls = controls.borrow();
        assert_eq!(controls.error.as_deref(), Some("Please just upload one file."));
        assert_eq!(controls.file_name, "keep.png");
        assert!(controls.clear_visible);
        assert!(controls.preview.is_some());
    }

    #[test]
    fn empty_selection_only_hides_the_error() {
        let (mut widget, controls) = widget();
        widget.handle_selection(&[png("keep.png", 100)]);
        widget.handle_selection(&[jpeg("big.jpg", 6 * 1024 * 1024)]);
        assert!(controls.borrow().error.is_some());

        widget.handle_selection(&[]);
        assert!(controls.borrow().error.is_none());
    }

    #[test]
    fn clear_is_idempotent() {
        let (mut widget, controls) = widget();
        widget.handle_selection(&[png("team.png", 100)]);

        widget.clear();
        let first = format!("{:?}", controls.borrow());
        widget.clear();
        let second = format!("{:?}", controls.borrow());

        assert_eq!(first, second);
        assert!(!controls.borrow().clear_visible);
        assert!(controls.borrow().upload_visible);
        assert_eq!(widget.live_preview_count(), 0);
    }

    #[test]
    fn preview_urls_never_leak_across_reaccepts_and_clears() {
        let (mut widget, _controls) = widget();
        widget.handle_selection(&[png("one.png", 100)]);
        widget.handle_selection(&[png("two.png", 100)]);
        assert_eq!(widget.live_preview_count(), 1);

        widget.clear();
        assert_eq!(widget.live_preview_count(), 0);

        widget.handle_selection(&[png("three.png", 100)]);
        widget.close();
        assert_eq!(widget.live_preview_count(), 0);
    }

    #[test]
    fn widget_without_preview_affordances_skips_preview_state() {
        let controls = Rc::new(RefCell::new(MockControls::plain()));
        let mut widget = UploadWidget::build(controls.clone(), 5);
        widget.handle_selection(&[png("team.png", 100)]);

        assert!(controls.borrow().preview.is_none());
        assert_eq!(widget.live_preview_count(), 0);
        assert_eq!(controls.borrow().file_name, "team.png");
    }

    #[test]
    fn empty_drop_is_ignored_and_full_drop_installs_then_validates() {
        let (mut widget, controls) = widget();
        widget.handle_drop(&[]);
        assert_eq!(controls.borrow().installed, 0);

        widget.handle_drop(&[png("dropped.png", 100)]);
        assert_eq!(controls.borrow().installed, 1);
        assert_eq!(controls.borrow().file_name, "dropped.png");
    }

    // Editing-flow widget wiring.

    struct NullEditor {
        loaded: bool,
    }

    impl EditorSurface for NullEditor {
        fn configure(&mut self, _options: &EditorOptions) {}

        fn load(&mut self, _file: &SelectedFile) {
            self.loaded = true;
        }

        fn reset(&mut self) {
            self.loaded = false;
        }

        fn is_loaded(&self) -> bool {
            self.loaded
        }
    }

    struct NullModal;

    impl ModalHost for NullModal {
        fn open(&mut self) {}
        fn close(&mut self) {}
        fn set_busy(&mut self, _busy: bool) {}
    }

    fn shared_manager() -> Rc<RefCell<SessionManager>> {
        let factory: EditorFactory = Box::new(|| Box::new(NullEditor { loaded: false }));
        Rc::new(RefCell::new(SessionManager::new(
            factory,
            Box::new(NullModal),
            EditorTheme::Light,
        )))
    }

    #[test]
    fn accepted_file_starts_an_edit_session_for_the_widget_target() {
        let manager = shared_manager();
        let controls = Rc::new(RefCell::new(MockControls::plain()));
        let commits: Rc<RefCell<Vec<(String, UploadTarget)>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = commits.clone();
        let mut widget = DirectUploadWidget::build(
            controls.clone(),
            manager.clone(),
            UploadTarget::Logo { night: true },
            move |file, target| sink.borrow_mut().push((file.name, target)),
            5,
        );

        let token = widget
            .handle_selection(&[png("night.png", 100)])
            .expect("selection should not error")
            .expect("session should start");
        assert!(!manager.borrow().is_idle());

        manager
            .borrow_mut()
            .complete(token, EditedResult::new(vec![1], "image/png"));

        let commits = commits.borrow();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].0, "night.png");
        assert_eq!(commits[0].1, UploadTarget::Logo { night: true });
        assert!(manager.borrow().is_idle());
        // Session teardown cleared the widget's backing input.
        assert_eq!(controls.borrow().input_resets, 1);
    }

    #[test]
    fn rejected_selection_never_starts_a_session() {
        let manager = shared_manager();
        let controls = Rc::new(RefCell::new(MockControls::plain()));
        let mut widget = DirectUploadWidget::build(
            controls.clone(),
            manager.clone(),
            UploadTarget::Icon,
            |_file, _target| panic!("commit must not run"),
            5,
        );

        let token = widget
            .handle_selection(&[jpeg("big.jpg", 6 * 1024 * 1024)])
            .expect("selection should not error");
        assert!(token.is_none());
        assert!(manager.borrow().is_idle());
        assert!(controls.borrow().error.is_some());
        assert_eq!(controls.borrow().input_resets, 1);
    }

    #[test]
    fn two_widgets_share_one_editor_sequentially() {
        let manager = shared_manager();
        let icon_controls = Rc::new(RefCell::new(MockControls::plain()));
        let logo_controls = Rc::new(RefCell::new(MockControls::plain()));
        let commits: Rc<RefCell<Vec<UploadTarget>>> = Rc::new(RefCell::new(Vec::new()));

        let sink = commits.clone();
        let mut icon_widget = DirectUploadWidget::build(
            icon_controls.clone(),
            manager.clone(),
            UploadTarget::Icon,
            move |_file, target| sink.borrow_mut().push(target),
            5,
        );
        let sink = commits.clone();
        let mut logo_widget = DirectUploadWidget::build(
            logo_controls.clone(),
            manager.clone(),
            UploadTarget::Logo { night: false },
            move |_file, target| sink.borrow_mut().push(target),
            5,
        );

        let icon_token = icon_widget
            .handle_selection(&[png("icon.png", 10)])
            .expect("no error")
            .expect("session should start");
        manager
            .borrow_mut()
            .complete(icon_token, EditedResult::new(vec![1], "image/png"));

        let logo_token = logo_widget
            .handle_selection(&[png("logo.png", 10)])
            .expect("no error")
            .expect("session should start");
        manager.borrow_mut().cancel(logo_token);

        assert_eq!(commits.borrow().as_slice(), &[UploadTarget::Icon]);
        assert!(manager.borrow().is_idle());
        assert_eq!(icon_controls.borrow().input_resets, 1);
        assert_eq!(logo_controls.borrow().input_resets, 1);
    }
}
