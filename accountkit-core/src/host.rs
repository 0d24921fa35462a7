/// Presentation side effects the host performs on behalf of a modal flow.
#[uniffi::export(with_foreign)]
pub trait ModalHost: Send + Sync {
    /// Shows a transient, fire-and-forget notification.
    fn show_toast(&self, message: String);

    /// Resets navigation to the app's home destination.
    fn reset_to_home(&self);

    /// Dismisses the modal that hosts the flow.
    fn close_modal(&self);
}
