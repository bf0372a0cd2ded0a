//! Main application state and render loop.
//!
//! `App` owns the form, the current result and the preview, and is the only
//! place where they change. Key presses, timers and finished requests all
//! arrive as [`Action`]s on one channel.

use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Terminal;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use tubedesc_client::GenerationClient;
use tubedesc_core::description::{GenerationResult, ResultId, ServiceResponse};
use tubedesc_core::reveal::TickOutcome;
use tubedesc_core::submission::{
    GenerationService, Submission, SubmissionController, SubmissionOutcome, SubmitRejected,
};
use tubedesc_core::TubedescConfig;

use crate::action::{Action, InputMode, Pane};
use crate::clipboard;
use crate::components::description_form::DescriptionFormComponent;
use crate::components::help::HelpComponent;
use crate::components::preview::PreviewComponent;
use crate::components::status_bar::StatusBarComponent;
use crate::components::Component;
use crate::composer::{ViewComposer, ViewMode};
use crate::event::{self, EventHandler, InputModeFlag};
use crate::theme::Theme;
use crate::timers::{self, RevealTimer};

/// Tick rate of the event loop; also the caret blink period.
const TICK_RATE: Duration = Duration::from_millis(250);

/// Main application state.
pub struct App<S = GenerationClient> {
    config: TubedescConfig,
    should_quit: bool,
    /// Shared flag to tell the EventHandler which key-mapping to use.
    input_mode_flag: InputModeFlag,

    service: Arc<S>,
    controller: SubmissionController,
    /// The last successful generation, if any.
    result: Option<GenerationResult>,

    focus: Pane,
    composer: ViewComposer,
    reveal_timer: RevealTimer,
    /// Terminal width at the last draw.
    width: u16,

    // Components
    form: DescriptionFormComponent,
    preview: PreviewComponent,
    status_bar: StatusBarComponent,
    help: HelpComponent,
}

impl App<GenerationClient> {
    pub fn new(config: TubedescConfig) -> Self {
        let client = GenerationClient::from_config(&config.service);
        info!(endpoint = %client.generate_url(), "Using generation service");
        Self::with_service(config, client)
    }
}

impl<S: GenerationService + 'static> App<S> {
    pub fn with_service(config: TubedescConfig, service: S) -> Self {
        let form = DescriptionFormComponent::new(config.form.clone());
        let preview = PreviewComponent::new(config.preview.copied_feedback());
        Self {
            config,
            should_quit: false,
            input_mode_flag: event::new_input_mode_flag(),
            service: Arc::new(service),
            controller: SubmissionController::new(),
            result: None,
            focus: Pane::Form,
            composer: ViewComposer::new(),
            reveal_timer: RevealTimer::new(),
            width: u16::MAX,
            form,
            preview,
            status_bar: StatusBarComponent::new(),
            help: HelpComponent::new(),
        }
    }

    /// Pre-fill the video URL from CLI args.
    pub fn set_initial_url(&mut self, url: &str) {
        self.form.set_video_url(url);
    }

    /// Run the TUI application.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();

        let event_handler =
            EventHandler::new(tx.clone(), TICK_RATE, self.input_mode_flag.clone());
        tokio::spawn(async move {
            event_handler.run().await;
        });

        self.sync_input_mode();

        loop {
            terminal.draw(|frame| {
                self.render(frame);
            })?;
            self.width = terminal.size()?.width;

            if let Some(action) = rx.recv().await {
                self.handle_action(action, &tx);

                if self.should_quit {
                    break;
                }
            }
        }

        // Nothing may touch the screen once we leave.
        self.reveal_timer.stop();
        self.controller.detach();

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableBracketedPaste
        )?;
        terminal.show_cursor()?;

        Ok(())
    }

    /// Determine and set the correct input mode. Called after every action.
    fn sync_input_mode(&self) {
        event::set_input_mode(&self.input_mode_flag, self.current_input_mode());
    }

    fn current_input_mode(&self) -> InputMode {
        if self.help.visible {
            return InputMode::Normal;
        }
        let wants_input = match self.focus {
            Pane::Form => self.form.wants_input(),
            Pane::Preview => self.preview.wants_input(),
        };
        if wants_input {
            InputMode::Editing
        } else {
            InputMode::Normal
        }
    }

    /// Keep focus on a pane that is actually on screen.
    fn sync_focus(&mut self) {
        let narrow_width = self.config.layout.narrow_width;
        if self.composer.preview_only(self.width, narrow_width) {
            self.focus = Pane::Preview;
        } else if self.composer.mode() != ViewMode::FormAndPreview {
            self.focus = Pane::Form;
        }
        self.form.active = self.focus == Pane::Form;
        self.preview.active = self.focus == Pane::Preview;
        self.preview.sliding = self.composer.is_sliding();
        self.form.busy = self.controller.is_busy();
        self.status_bar.badge = self.badge();
    }

    /// Whether the preview pane has text to show. A kept result does not
    /// count once the preview was unmounted.
    fn preview_loaded(&self) -> bool {
        self.preview.reveal().source().is_some()
    }

    fn badge(&self) -> &'static str {
        if self.preview.wants_input() {
            "Editing"
        } else if self.controller.is_busy() {
            "Generating"
        } else if self.focus == Pane::Preview {
            "Preview"
        } else {
            "Form"
        }
    }

    /// Dispatch an action to the app and the relevant components.
    pub fn handle_action(&mut self, action: Action, tx: &mpsc::UnboundedSender<Action>) {
        // The one action that carries owned results is consumed here.
        let action = match action {
            Action::GenerationFinished {
                submission,
                response,
            } => {
                self.finish_generation(submission, response, tx);
                self.sync_focus();
                self.sync_input_mode();
                return;
            }
            other => other,
        };

        // While help is open, a key only closes it.
        if self.help.visible {
            self.help.handle_action(&action);
            if !self.help.visible {
                self.sync_input_mode();
                return;
            }
        }

        let action = self.resolve(action);

        match &action {
            Action::Quit => {
                self.should_quit = true;
                return;
            }
            Action::SubmitForm => self.submit(tx),
            Action::GenerationStarted => self.start_transition(tx),
            Action::PreviewShown(epoch) => {
                if self.composer.reveal_preview(*epoch) {
                    debug!(epoch, "Preview joined the layout");
                    if self.preview_loaded() {
                        self.focus = Pane::Preview;
                    }
                    timers::send_after(
                        self.config.layout.settle_delay(),
                        tx.clone(),
                        Action::TransitionSettled(*epoch),
                    );
                }
            }
            Action::TransitionSettled(epoch) => {
                self.composer.settle(*epoch);
            }
            Action::BackToForm => self.back_to_form(),
            Action::FocusForm => self.focus = Pane::Form,
            Action::FocusPreview => {
                if self.composer.mode() == ViewMode::FormAndPreview {
                    self.focus = Pane::Preview;
                }
            }
            Action::RevealTick(id) => self.reveal_tick(*id),
            Action::Copy => self.copy(),
            Action::EditSaved(text) => {
                if let Some(result) = self.result.as_mut() {
                    result.set_resume(text.clone());
                    info!(result = %result.id, "Saved edited description");
                }
                self.status_bar.message = "Edit saved".to_string();
            }
            _ => {}
        }

        // Forward to the components that care.
        let chained = match &action {
            Action::Tick => self.preview.handle_action(&action),
            Action::ResetForm => self.form.handle_action(&action),
            Action::BeginEdit | Action::SaveEdit | Action::CancelEdit => {
                self.preview.handle_action(&action)
            }
            _ => match self.focus {
                Pane::Form => self.form.handle_action(&action),
                Pane::Preview => self.preview.handle_action(&action),
            },
        };

        self.help.handle_action(&action);
        self.status_bar.handle_action(&action);

        self.sync_focus();
        self.sync_input_mode();

        if let Some(chained) = chained {
            self.handle_action(chained, tx);
        }
    }

    /// Turn context-dependent keys into concrete actions.
    fn resolve(&self, action: Action) -> Action {
        let editing_preview = self.focus == Pane::Preview && self.preview.wants_input();
        match action {
            Action::Save if editing_preview => Action::SaveEdit,
            Action::Save => Action::SubmitForm,
            Action::Escape if editing_preview => Action::CancelEdit,
            Action::Escape if self.composer.mode() == ViewMode::FormAndPreview => {
                Action::FocusPreview
            }
            Action::PasteInput => match clipboard::read_clipboard() {
                Ok(text) => Action::PasteBulk(text),
                Err(e) => {
                    warn!("Paste failed: {:#}", e);
                    Action::SetStatus(format!("Paste failed: {}", e))
                }
            },
            other => other,
        }
    }

    // ── Submission ──────────────────────────────────────────────

    fn submit(&mut self, tx: &mpsc::UnboundedSender<Action>) {
        match self.controller.begin(&self.form.form) {
            Ok(submission) => {
                self.form.clear_errors();
                let _ = tx.send(Action::GenerationStarted);
                self.spawn_generation(submission, tx.clone());
            }
            Err(SubmitRejected::Busy) => {
                self.status_bar.message = "A generation is already in progress".to_string();
            }
            Err(SubmitRejected::Invalid(errors)) => {
                info!(fields = errors.errors.len(), "Form rejected by validation");
                self.status_bar.message = format!("Please check the form: {}", errors);
                self.form.show_errors(errors);
                if self
                    .composer
                    .preview_only(self.width, self.config.layout.narrow_width)
                {
                    self.back_to_form();
                }
                self.focus = Pane::Form;
            }
        }
    }

    /// Send the request on a background task; the answer comes back as
    /// `GenerationFinished`.
    fn spawn_generation(&self, submission: Submission, tx: mpsc::UnboundedSender<Action>) {
        let service = Arc::clone(&self.service);
        tokio::spawn(async move {
            let response = service.generate(&submission.request).await;
            let _ = tx.send(Action::GenerationFinished {
                submission,
                response,
            });
        });
    }

    fn start_transition(&mut self, tx: &mpsc::UnboundedSender<Action>) {
        // Already abandoned before the view got to move.
        if !self.controller.is_busy() {
            return;
        }
        self.status_bar.message = "Generating description...".to_string();
        if let Some(epoch) = self.composer.begin_transition() {
            timers::send_after(
                self.config.layout.preview_delay(),
                tx.clone(),
                Action::PreviewShown(epoch),
            );
        }
    }

    fn finish_generation(
        &mut self,
        submission: Submission,
        response: tubedesc_core::Result<ServiceResponse>,
        tx: &mpsc::UnboundedSender<Action>,
    ) {
        match self.controller.finish(submission, response) {
            SubmissionOutcome::Completed(result) => self.apply_result(result, tx),
            SubmissionOutcome::Failed(e) => {
                self.status_bar.message = format!("Generation failed: {}", e);
                // Nothing on screen to fall back to: do not leave an empty
                // preview behind.
                if !self.preview_loaded() {
                    self.composer.back_to_form();
                }
            }
            SubmissionOutcome::Stale => {}
        }
    }

    fn apply_result(&mut self, result: GenerationResult, tx: &mpsc::UnboundedSender<Action>) {
        if self.preview.load(&result) {
            self.reveal_timer.start(
                result.id,
                self.config.preview.reveal_interval(),
                tx.clone(),
            );
        }
        self.result = Some(result);
        if self.composer.mode() == ViewMode::FormAndPreview {
            self.focus = Pane::Preview;
        }
        self.status_bar.message = "Description received".to_string();
    }

    // ── Preview ─────────────────────────────────────────────────

    fn reveal_tick(&mut self, id: ResultId) {
        if let TickOutcome::Completed(_) = self.preview.tick(id) {
            self.reveal_timer.stop();
            self.status_bar.message =
                "Description ready: c to copy, e to edit".to_string();
        }
    }

    fn copy(&mut self) {
        let Some(text) = self.preview.copy_text() else {
            self.status_bar.message =
                "Copy is available once the description is complete".to_string();
            return;
        };
        match clipboard::copy_to_clipboard(text) {
            Ok(()) => {
                self.preview.mark_copied(Instant::now());
                self.status_bar.message = "Copied!".to_string();
            }
            Err(e) => {
                warn!("Copy failed: {:#}", e);
                self.status_bar.message = format!("Copy failed: {}", e);
            }
        }
    }

    /// Leave the preview. Unsaved edits are dropped and an in-flight request
    /// is abandoned.
    fn back_to_form(&mut self) {
        if self.controller.is_busy() {
            info!("Abandoning in-flight generation");
        }
        self.controller.detach();
        self.reveal_timer.stop();
        self.preview.unmount();
        self.composer.back_to_form();
        self.focus = Pane::Form;
    }

    // ── Rendering ───────────────────────────────────────────────

    fn render(&self, frame: &mut ratatui::Frame) {
        let area = frame.area();

        let [header, main, status] = Layout::vertical([
            Constraint::Length(1), // Title
            Constraint::Min(5),    // Panes
            Constraint::Length(1), // Status bar
        ])
        .areas(area);

        let title = Line::from(vec![
            Span::styled(" tubedesc ", Theme::title()),
            Span::styled("YouTube description generator", Theme::dim()),
        ]);
        frame.render_widget(Paragraph::new(title), header);

        let panes = self
            .composer
            .panes(main, self.config.layout.narrow_width);
        if let Some(area) = panes.form {
            self.form.render(frame, area);
        }
        if let Some(area) = panes.preview {
            self.preview.render(frame, area);
        }

        self.status_bar.render(frame, status);

        // Overlays (rendered on top)
        self.help.render(frame, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tubedesc_core::description::{GeneratedDescription, GenerationRequest};
    use tubedesc_core::options::{DescriptionTone, VideoType};
    use tubedesc_core::reveal::RevealPhase;
    use tubedesc_core::TubedescError;

    struct FakeService {
        calls: AtomicUsize,
        replies: Mutex<VecDeque<tubedesc_core::Result<ServiceResponse>>>,
    }

    impl FakeService {
        fn replying(replies: Vec<tubedesc_core::Result<ServiceResponse>>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                replies: Mutex::new(replies.into()),
            }
        }
    }

    impl GenerationService for FakeService {
        async fn generate(
            &self,
            _request: &GenerationRequest,
        ) -> tubedesc_core::Result<ServiceResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(TubedescError::Transport("no reply scripted".into())))
        }
    }

    type Channel = (
        mpsc::UnboundedSender<Action>,
        mpsc::UnboundedReceiver<Action>,
    );

    fn app(replies: Vec<tubedesc_core::Result<ServiceResponse>>) -> (App<FakeService>, Channel) {
        let mut app = App::with_service(TubedescConfig::default(), FakeService::replying(replies));
        app.form.form.video_type = Some(VideoType::Tutorial);
        app.form.form.description_tone = Some(DescriptionTone::Seo);
        app.set_initial_url("https://www.youtube.com/watch?v=LgGmaX-l5K8");
        (app, mpsc::unbounded_channel())
    }

    fn described(resume: &str) -> tubedesc_core::Result<ServiceResponse> {
        Ok(ServiceResponse::Success(GeneratedDescription {
            resume: resume.into(),
            call_to_action: "Subscribe!".into(),
            ..GeneratedDescription::default()
        }))
    }

    /// Feed actions from the channel until `done` holds.
    async fn drive_until(
        app: &mut App<FakeService>,
        channel: &mut Channel,
        done: impl Fn(&App<FakeService>) -> bool,
    ) {
        let (tx, rx) = channel;
        tokio::time::timeout(Duration::from_secs(5), async {
            while !done(app) {
                let action = rx.recv().await.expect("channel closed");
                app.handle_action(action, tx);
            }
        })
        .await
        .expect("condition not reached in time");
    }

    fn reveal_fully(app: &mut App<FakeService>, tx: &mpsc::UnboundedSender<Action>) {
        let id = app.result.as_ref().unwrap().id;
        while app.preview.reveal().is_revealing() {
            app.handle_action(Action::RevealTick(id), tx);
        }
    }

    #[tokio::test]
    async fn successful_generation_reaches_the_preview() {
        let (mut app, mut channel) = app(vec![described("Hello")]);
        app.handle_action(Action::Save, &channel.0);
        assert!(app.controller.is_busy());

        drive_until(&mut app, &mut channel, |a| a.result.is_some()).await;

        assert!(!app.controller.is_busy());
        assert_ne!(app.composer.mode(), ViewMode::FormOnly);
        assert_eq!(app.preview.reveal().source(), Some(app.result.as_ref().unwrap().id));

        drive_until(&mut app, &mut channel, |a| {
            a.composer.mode() == ViewMode::FormAndPreview && !a.composer.is_sliding()
        })
        .await;
        assert_eq!(app.focus, Pane::Preview);
    }

    #[tokio::test]
    async fn invalid_url_is_rejected_before_any_request() {
        let (mut app, channel) = app(vec![described("unused")]);
        app.set_initial_url("https://vimeo.com/123");

        app.handle_action(Action::SubmitForm, &channel.0);

        assert_eq!(app.service.calls.load(Ordering::SeqCst), 0);
        assert!(!app.controller.is_busy());
        assert_eq!(app.composer.mode(), ViewMode::FormOnly);
        assert!(app
            .form
            .errors()
            .for_field(tubedesc_core::form::FormField::VideoUrl)
            .is_some());
    }

    #[tokio::test]
    async fn service_error_keeps_the_previous_preview() {
        let (mut app, mut channel) = app(vec![
            described("Hello"),
            Ok(ServiceResponse::Failure {
                error: "quota exceeded".into(),
            }),
        ]);
        app.handle_action(Action::SubmitForm, &channel.0);
        drive_until(&mut app, &mut channel, |a| a.result.is_some()).await;
        let first_id = app.result.as_ref().unwrap().id;

        app.handle_action(Action::SubmitForm, &channel.0);
        drive_until(&mut app, &mut channel, |a| !a.controller.is_busy()).await;

        let result = app.result.as_ref().unwrap();
        assert_eq!(result.id, first_id);
        assert_eq!(result.description.resume, "Hello");
        assert_eq!(app.preview.reveal().source(), Some(first_id));
        assert!(app.status_bar.message.contains("quota exceeded"));
    }

    #[tokio::test]
    async fn first_failure_returns_to_the_form() {
        let (mut app, mut channel) = app(vec![Err(TubedescError::Transport(
            "connection refused".into(),
        ))]);
        app.handle_action(Action::SubmitForm, &channel.0);
        drive_until(&mut app, &mut channel, |a| {
            !a.controller.is_busy() && a.status_bar.message.starts_with("Generation failed")
        })
        .await;

        assert!(app.result.is_none());
        assert_eq!(app.composer.mode(), ViewMode::FormOnly);
        assert_eq!(app.focus, Pane::Form);
    }

    /// Handle whatever arrives until the channel stays quiet for `quiet`.
    async fn drain(app: &mut App<FakeService>, channel: &mut Channel, quiet: Duration) {
        let (tx, rx) = channel;
        while let Ok(Some(action)) = tokio::time::timeout(quiet, rx.recv()).await {
            app.handle_action(action, tx);
        }
    }

    #[tokio::test]
    async fn failure_after_going_back_returns_to_the_form() {
        let (mut app, mut channel) = app(vec![
            described("Hello"),
            Ok(ServiceResponse::Failure {
                error: "quota exceeded".into(),
            }),
        ]);
        app.handle_action(Action::SubmitForm, &channel.0);
        drive_until(&mut app, &mut channel, |a| a.focus == Pane::Preview).await;
        let tx = channel.0.clone();
        reveal_fully(&mut app, &tx);

        app.handle_action(Action::BackToForm, &tx);
        app.handle_action(Action::SubmitForm, &tx);
        drive_until(&mut app, &mut channel, |a| !a.controller.is_busy()).await;
        drain(&mut app, &mut channel, Duration::from_millis(1500)).await;

        assert!(app.status_bar.message.contains("quota exceeded"));
        assert_eq!(app.composer.mode(), ViewMode::FormOnly);
        assert_eq!(app.focus, Pane::Form);
        assert!(app.result.is_some());
    }

    #[tokio::test]
    async fn leaving_while_editing_discards_the_edit() {
        let (mut app, mut channel) = app(vec![described("Hello")]);
        app.handle_action(Action::SubmitForm, &channel.0);
        drive_until(&mut app, &mut channel, |a| a.focus == Pane::Preview).await;
        let tx = channel.0.clone();
        reveal_fully(&mut app, &tx);

        app.handle_action(Action::BeginEdit, &tx);
        assert!(app.preview.wants_input());
        assert_eq!(event::get_input_mode(&app.input_mode_flag), InputMode::Editing);
        app.handle_action(Action::CharInput('!'), &tx);

        app.handle_action(Action::BackToForm, &tx);

        assert_eq!(app.result.as_ref().unwrap().description.resume, "Hello");
        assert_eq!(app.preview.reveal().phase(), RevealPhase::Idle);
        assert_eq!(app.composer.mode(), ViewMode::FormOnly);
        assert_eq!(app.focus, Pane::Form);
    }

    #[tokio::test]
    async fn saving_an_edit_updates_the_result_without_restarting() {
        let (mut app, mut channel) = app(vec![described("Hello")]);
        app.handle_action(Action::SubmitForm, &channel.0);
        drive_until(&mut app, &mut channel, |a| a.focus == Pane::Preview).await;
        let tx = channel.0.clone();
        reveal_fully(&mut app, &tx);

        app.handle_action(Action::BeginEdit, &tx);
        app.handle_action(Action::CharInput('!'), &tx);
        app.handle_action(Action::Save, &tx);

        let expected = "Hello\n\nSubscribe!!";
        assert_eq!(app.result.as_ref().unwrap().description.resume, expected);
        assert_eq!(app.preview.reveal().revealed(), expected);
        assert!(app.preview.reveal().is_complete());
        assert_eq!(event::get_input_mode(&app.input_mode_flag), InputMode::Normal);
    }

    #[tokio::test]
    async fn answer_after_going_back_is_ignored() {
        let (mut app, mut channel) = app(vec![described("late")]);
        app.handle_action(Action::SubmitForm, &channel.0);
        app.handle_action(Action::BackToForm, &channel.0);
        assert!(!app.controller.is_busy());

        let (tx, rx) = &mut channel;
        let finished = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let action = rx.recv().await.expect("channel closed");
                let done = matches!(action, Action::GenerationFinished { .. });
                app.handle_action(action, tx);
                if done {
                    break;
                }
            }
        })
        .await;
        assert!(finished.is_ok());
        assert_eq!(app.service.calls.load(Ordering::SeqCst), 1);
        assert!(app.result.is_none());
        assert_eq!(app.composer.mode(), ViewMode::FormOnly);
    }

    #[tokio::test]
    async fn copy_is_refused_while_revealing() {
        let (mut app, mut channel) = app(vec![described("Hello")]);
        app.handle_action(Action::SubmitForm, &channel.0);
        drive_until(&mut app, &mut channel, |a| a.result.is_some()).await;
        assert!(app.preview.reveal().is_revealing());

        app.handle_action(Action::Copy, &channel.0);
        assert!(app.status_bar.message.starts_with("Copy is available"));
        assert!(!app.preview.copied_visible(Instant::now()));
    }

    #[tokio::test]
    async fn stale_reveal_ticks_do_nothing() {
        let (mut app, mut channel) = app(vec![described("Hello")]);
        app.handle_action(Action::SubmitForm, &channel.0);
        drive_until(&mut app, &mut channel, |a| a.result.is_some()).await;
        let before = app.preview.reveal().revealed().to_string();
        app.handle_action(Action::RevealTick(ResultId(u64::MAX)), &channel.0);
        assert_eq!(app.preview.reveal().revealed(), before);
    }

    #[tokio::test]
    async fn second_submit_while_busy_is_refused() {
        let (mut app, channel) = app(vec![described("Hello")]);
        app.handle_action(Action::SubmitForm, &channel.0);
        app.handle_action(Action::SubmitForm, &channel.0);
        assert_eq!(app.status_bar.message, "A generation is already in progress");
        assert_matches!(app.badge(), "Generating");
    }
}
