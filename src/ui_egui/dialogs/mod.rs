pub mod search_dialog;
