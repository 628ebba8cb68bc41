pub mod batch_widths;
pub mod calculate_worker_threads;
pub mod pixel_to_complex_coords;
