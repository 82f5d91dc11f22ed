mod append_mode;
mod full_run;
