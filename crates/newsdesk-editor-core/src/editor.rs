//! The rich-text editor: one surface plus the components that supervise it.
//!
//! Every mutation path ends the same way, synchronously and in order:
//! serialize and notify the host page, then requery and publish the format
//! snapshot.

use crate::actions::{KeyCombo, KeydownResult};
use crate::capability::Command;
use crate::config::{EditorConfig, RefreshPolicy};
use crate::controller::{SurfaceController, SyncOutcome};
use crate::dispatch::dispatch_command;
use crate::error::EditorError;
use crate::lifecycle::{EditorPhase, PhaseEvent};
use crate::paste::{PasteOutcome, sanitize_paste};
use crate::platform::{ClipboardPlatform, EditSurface};
use crate::snapshot::FormatSnapshot;
use crate::toolbar::{Toolbar, ToolbarItem};
use crate::tracker::{FormatTracker, SubscriberId};

pub struct RichTextEditor<S: EditSurface> {
    surface: S,
    config: EditorConfig,
    controller: SurfaceController,
    tracker: FormatTracker,
    toolbar: Toolbar,
    phase: EditorPhase,
}

impl<S: EditSurface> RichTextEditor<S> {
    /// Take over `surface`, seeding it from `config.value` when they differ.
    pub fn mount(mut surface: S, config: EditorConfig) -> Self {
        let mut controller = SurfaceController::new();
        controller.initialize(&mut surface, &config.value);

        let mut tracker = FormatTracker::new();
        tracker.refresh(&surface);

        tracing::debug!(
            target: "newsdesk::editor",
            name = config.field_name().unwrap_or(""),
            "editor mounted"
        );

        Self {
            surface,
            config,
            controller,
            tracker,
            toolbar: Toolbar::standard(),
            phase: EditorPhase::Idle,
        }
    }

    /// Release the surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Direct surface access for host-driven input (typing, caret moves).
    ///
    /// Follow content mutations with [`on_input`](Self::on_input) and caret
    /// moves with [`on_selection_change`](Self::on_selection_change).
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn toolbar(&self) -> &Toolbar {
        &self.toolbar
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    pub fn snapshot(&self) -> FormatSnapshot {
        self.tracker.current()
    }

    /// Current serialized content.
    pub fn value(&self) -> String {
        self.surface.content()
    }

    /// Whether the placeholder should show.
    pub fn is_empty(&self) -> bool {
        self.surface.content().is_empty()
    }

    pub fn set_on_change(&mut self, callback: impl FnMut(&str) + 'static) {
        self.controller.set_on_change(callback);
    }

    pub fn clear_on_change(&mut self) {
        self.controller.clear_on_change();
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&FormatSnapshot) + 'static) -> SubscriberId {
        self.tracker.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.tracker.unsubscribe(id)
    }

    pub fn render_toolbar(&self) -> Vec<ToolbarItem<'_>> {
        self.toolbar.render(&self.tracker.current())
    }

    /// Dispatch a formatting command. Never fails: ignored commands simply
    /// leave the next snapshot unchanged.
    pub fn execute(&mut self, command: &Command) {
        self.advance(PhaseEvent::Input);
        dispatch_command(&mut self.surface, command);
        self.finish_mutation();
    }

    /// Dispatch by command id, as received from the string/JS boundary.
    pub fn execute_named(&mut self, command_id: &str, argument: Option<&str>) -> Result<(), EditorError> {
        let command = Command::parse(command_id, argument)?;
        self.execute(&command);
        Ok(())
    }

    /// Toolbar button click. Returns false for an unknown index.
    pub fn activate_button(&mut self, index: usize) -> bool {
        let Some(command) = self.toolbar.activate(index).cloned() else {
            return false;
        };
        self.execute(&command);
        true
    }

    /// Keyboard accelerators route through the same commands as the buttons.
    pub fn handle_keydown(&mut self, combo: &KeyCombo, is_mac: bool) -> KeydownResult {
        match self.toolbar.command_for_key(combo, is_mac).cloned() {
            Some(command) => {
                self.execute(&command);
                KeydownResult::Handled
            }
            None => KeydownResult::NotHandled,
        }
    }

    /// The surface content changed through direct input.
    pub fn on_input(&mut self) {
        self.advance(PhaseEvent::Input);
        self.finish_mutation();
    }

    /// Replace the host's default paste with a plain-text insertion.
    pub fn paste<C: ClipboardPlatform + ?Sized>(&mut self, clipboard: &C) -> PasteOutcome {
        self.advance(PhaseEvent::Input);
        let outcome = sanitize_paste(&mut self.surface, clipboard, self.config.max_paste_chars);
        if outcome.inserted() {
            self.finish_mutation();
        } else {
            // Nothing changed; the phase still has to come back to idle.
            self.advance(PhaseEvent::Mutated);
            self.publish();
        }
        outcome
    }

    /// The caret or selection moved. Returns whether a refresh ran.
    pub fn on_selection_change(&mut self) -> bool {
        if self.config.refresh_policy == RefreshPolicy::FocusedOnly && !self.surface.has_focus() {
            return false;
        }
        self.advance(PhaseEvent::SelectionChanged);
        self.publish();
        true
    }

    /// The parent pushed a new value.
    pub fn set_value(&mut self, value: &str) -> SyncOutcome {
        let outcome = self.controller.on_external_value_change(&mut self.surface, value);
        if outcome == SyncOutcome::Reseeded {
            self.tracker.refresh(&self.surface);
        }
        outcome
    }

    /// Reseed even over unsynced local edits.
    pub fn reset(&mut self, value: &str) -> SyncOutcome {
        let outcome = self.controller.reset(&mut self.surface, value);
        if outcome == SyncOutcome::Reseeded {
            self.tracker.refresh(&self.surface);
        }
        outcome
    }

    pub fn has_pending_edits(&self) -> bool {
        self.controller.has_pending_edits(&self.surface)
    }

    fn finish_mutation(&mut self) {
        self.controller.on_local_edit(&self.surface);
        self.advance(PhaseEvent::Mutated);
        self.publish();
    }

    fn publish(&mut self) {
        self.tracker.refresh(&self.surface);
        self.advance(PhaseEvent::Published);
    }

    fn advance(&mut self, event: PhaseEvent) {
        self.phase = self.phase.next(event);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::actions::Key;
    use crate::capability::Capability;
    use crate::memory::{MemoryClipboard, MemorySurface};

    fn mount(value: &str) -> (RichTextEditor<MemorySurface>, Rc<RefCell<Vec<String>>>) {
        let mut editor = RichTextEditor::mount(MemorySurface::new(), EditorConfig::new(value));
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        editor.set_on_change(move |v| sink.borrow_mut().push(v.to_string()));
        editor.surface_mut().focus();
        (editor, log)
    }

    #[test]
    fn test_scenario_typing_into_empty_editor() {
        let (mut editor, log) = mount("");
        assert!(editor.is_empty());

        editor.surface_mut().type_text("hello");
        editor.on_input();

        insta::assert_snapshot!(log.borrow().last().unwrap(), @"<p>hello</p>");
        assert_eq!(editor.phase(), EditorPhase::Idle);
        assert!(!editor.is_empty());
    }

    #[test]
    fn test_scenario_bold_selection() {
        let (mut editor, log) = mount("");
        editor.surface_mut().type_text("hello");
        editor.on_input();

        editor.surface_mut().select(0, 5);
        editor.on_selection_change();
        assert!(!editor.snapshot().is_active(Capability::Bold));

        let bold = editor.toolbar().buttons()[0].command.clone();
        editor.execute(&bold);

        assert!(editor.snapshot().is_active(Capability::Bold));
        insta::assert_snapshot!(log.borrow().last().unwrap(), @"<p><b>hello</b></p>");
    }

    #[test]
    fn test_scenario_external_value_during_edit() {
        let (mut editor, _log) = mount("");
        editor.surface_mut().type_text("unsaved");
        editor.on_input();

        assert_eq!(editor.set_value("<b>hi</b>"), SyncOutcome::Deferred);
        assert_eq!(editor.value(), "<p>unsaved</p>");
    }

    #[test]
    fn test_scenario_external_value_when_idle() {
        let (mut editor, log) = mount("<p>old</p>");

        assert_eq!(editor.set_value("<b>hi</b>"), SyncOutcome::Reseeded);
        assert_eq!(editor.value(), "<p><b>hi</b></p>");
        // Reseeding is not a local edit.
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_scenario_paste_markdown_looking_text() {
        let (mut editor, log) = mount("");
        let clipboard = MemoryClipboard::new()
            .with_text("Copied **Markdown**-looking text")
            .with_html("<p>Copied <strong>Markdown</strong>-looking text</p>");

        let outcome = editor.paste(&clipboard);

        assert!(outcome.inserted());
        assert_eq!(editor.surface().plain_text(), "Copied **Markdown**-looking text");
        let value = log.borrow().last().unwrap().clone();
        assert_eq!(value, "<p>Copied **Markdown**-looking text</p>");
        assert!(!value.contains("<b>") && !value.contains("<strong>"));
        assert!(!editor.snapshot().is_active(Capability::Bold));
    }

    #[test]
    fn test_empty_paste_notifies_nothing() {
        let (mut editor, log) = mount("<p>a</p>");
        let outcome = editor.paste(&MemoryClipboard::new());

        assert_eq!(outcome, PasteOutcome::Empty);
        assert!(log.borrow().is_empty());
        assert_eq!(editor.phase(), EditorPhase::Idle);
    }

    #[test]
    fn test_ignored_command_still_notifies_and_leaves_snapshot() {
        let (mut editor, log) = mount("<p>text</p>");
        editor.surface_mut().ignore_command(Capability::StrikeThrough);
        editor.surface_mut().select(0, 4);
        editor.on_selection_change();
        let before = editor.snapshot();

        editor.execute(&Command::new(Capability::StrikeThrough));

        assert_eq!(editor.snapshot(), before);
        assert_eq!(*log.borrow(), vec!["<p>text</p>".to_string()]);
        assert_eq!(editor.phase(), EditorPhase::Idle);
    }

    #[test]
    fn test_keyboard_accelerator_matches_button() {
        let (mut by_key, key_log) = mount("<p>word</p>");
        let (mut by_button, button_log) = mount("<p>word</p>");
        by_key.surface_mut().select(0, 4);
        by_button.surface_mut().select(0, 4);

        let combo = KeyCombo::primary(Key::character("i"), false);
        assert_eq!(by_key.handle_keydown(&combo, false), KeydownResult::Handled);
        assert!(by_button.activate_button(1));

        assert_eq!(*key_log.borrow(), *button_log.borrow());
        assert_eq!(by_key.value(), "<p><i>word</i></p>");
        assert_eq!(by_key.snapshot(), by_button.snapshot());
    }

    #[test]
    fn test_unbound_key_not_handled() {
        let (mut editor, log) = mount("");
        let combo = KeyCombo::primary(Key::character("q"), false);
        assert_eq!(editor.handle_keydown(&combo, false), KeydownResult::NotHandled);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_execute_named_unknown_command() {
        let (mut editor, log) = mount("");
        let err = editor.execute_named("fontSize", Some("7")).unwrap_err();
        assert!(matches!(err, EditorError::UnknownCommand(_)));
        assert!(log.borrow().is_empty());
        assert!(editor.execute_named("justifyCenter", None).is_ok());
        assert!(editor.snapshot().is_active(Capability::AlignCenter));
    }

    #[test]
    fn test_selection_change_respects_focus_policy() {
        let mut editor = RichTextEditor::mount(MemorySurface::from_markup("<p>x</p>"), EditorConfig::default());
        assert!(!editor.on_selection_change());

        let mut always = RichTextEditor::mount(
            MemorySurface::from_markup("<p>x</p>"),
            EditorConfig::default().with_refresh_policy(RefreshPolicy::Always),
        );
        assert!(always.on_selection_change());
    }

    #[test]
    fn test_subscribers_see_published_snapshots() {
        let (mut editor, _log) = mount("<p>abc</p>");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let id = editor.subscribe(move |snap| sink.borrow_mut().push(snap.is_active(Capability::Underline)));

        editor.surface_mut().select(0, 3);
        editor.execute(&Command::new(Capability::Underline));
        editor.execute(&Command::new(Capability::Underline));
        assert_eq!(*seen.borrow(), vec![true, false]);

        assert!(editor.unsubscribe(id));
        editor.execute(&Command::new(Capability::Underline));
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_toolbar_renders_current_snapshot() {
        let (mut editor, _log) = mount("<ul><li>item</li></ul>");
        editor.surface_mut().select(1, 1);
        editor.on_selection_change();

        let pressed: Vec<Capability> = editor
            .render_toolbar()
            .into_iter()
            .filter_map(|item| match item {
                ToolbarItem::Button { button, active: true, .. } => Some(button.command.capability),
                _ => None,
            })
            .collect();
        assert_eq!(pressed, vec![Capability::AlignLeft, Capability::UnorderedList]);
    }
}
