use morphcloud::window::App;
use morphcloud::MorphController;
use winit::event_loop::{ControlFlow, EventLoop};

fn main() {
    let cloud = MorphController::builder()
        .with_shape_label(|name| println!("shape: {name}"))
        .build();

    let event_loop = EventLoop::new().unwrap();
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(cloud);
    event_loop.run_app(&mut app).unwrap();
}
