pub mod choice_list;
pub mod completion;
pub mod confirm_dialog;
pub mod feedback;
pub mod progress_bar;
pub mod text_panel;
