mod components;
mod flag;
mod lookup;
