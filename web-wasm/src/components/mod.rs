pub mod header;
pub mod upload_panel;
pub mod prompt_panel;
pub mod action_buttons;
pub mod preview_pane;
pub mod result_panels;
