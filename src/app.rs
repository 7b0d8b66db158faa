//! Boot sequence of the example application: find the canvas, build a viewer
//! on it, then register the initial objects.
//!
//! The sequence is generic over the host document and the viewer factory so the
//! ordering can be checked without a browser. In the browser the host is the
//! page document and the factory is `Viewer::from_canvas`.

use std::fmt::Display;

use thiserror::Error;

use crate::log;

pub const DEFAULT_CANVAS_ID: &str = "viewer";
pub const DEFAULT_OBJECT_ID: u32 = 42;

/// Something that can resolve a canvas element by its DOM id.
pub trait Host {
    type Canvas;

    fn canvas_by_id(&self, id: &str) -> Option<Self::Canvas>;
}

/// A viewer that objects can be registered with.
pub trait SceneViewer {
    fn add_object(&mut self, id: u32);
}

/// Asynchronous constructor for viewers bound to a canvas.
#[allow(async_fn_in_trait)]
pub trait ViewerFactory {
    type Canvas;
    type Viewer: SceneViewer;
    type Error: Display;

    async fn from_canvas(&self, canvas: Self::Canvas) -> Result<Self::Viewer, Self::Error>;
}

#[derive(Debug, Error)]
pub enum BootError<E: Display> {
    #[error("no element with id `{0}` in the document")]
    MissingCanvas(String),

    #[error("viewer construction failed: {0}")]
    Viewer(E),
}

#[derive(Debug, Clone)]
pub struct BootOptions {
    pub canvas_id: String,
    pub objects: Vec<u32>,
}

impl Default for BootOptions {
    fn default() -> Self {
        Self {
            canvas_id: DEFAULT_CANVAS_ID.to_owned(),
            objects: vec![DEFAULT_OBJECT_ID],
        }
    }
}

/// Runs the boot sequence. Objects are only added once the factory has
/// resolved; on any failure no object is added.
pub async fn boot<H, F>(
    host: &H,
    factory: &F,
    options: &BootOptions,
) -> Result<F::Viewer, BootError<F::Error>>
where
    H: Host,
    F: ViewerFactory<Canvas = H::Canvas>,
{
    let canvas = host
        .canvas_by_id(&options.canvas_id)
        .ok_or_else(|| BootError::MissingCanvas(options.canvas_id.clone()))?;

    log!("boot(): creating viewer on #{}", options.canvas_id);
    let mut viewer = factory.from_canvas(canvas).await.map_err(BootError::Viewer)?;

    for &id in &options.objects {
        viewer.add_object(id);
    }

    Ok(viewer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Lookup(String),
        Constructed(u32),
        Added(u32),
    }

    type Journal = Rc<RefCell<Vec<Event>>>;

    struct FakeDocument {
        canvases: Vec<(&'static str, u32)>,
        journal: Journal,
    }

    impl Host for FakeDocument {
        type Canvas = u32;

        fn canvas_by_id(&self, id: &str) -> Option<u32> {
            self.journal.borrow_mut().push(Event::Lookup(id.to_owned()));
            self.canvases
                .iter()
                .find(|(name, _)| *name == id)
                .map(|&(_, handle)| handle)
        }
    }

    struct FakeViewer {
        journal: Journal,
    }

    impl SceneViewer for FakeViewer {
        fn add_object(&mut self, id: u32) {
            self.journal.borrow_mut().push(Event::Added(id));
        }
    }

    struct FakeFactory {
        fail: bool,
        journal: Journal,
    }

    impl ViewerFactory for FakeFactory {
        type Canvas = u32;
        type Viewer = FakeViewer;
        type Error = String;

        async fn from_canvas(&self, canvas: u32) -> Result<FakeViewer, String> {
            if self.fail {
                return Err("no WebGL2".to_owned());
            }
            self.journal.borrow_mut().push(Event::Constructed(canvas));
            Ok(FakeViewer {
                journal: self.journal.clone(),
            })
        }
    }

    fn setup(
        canvases: Vec<(&'static str, u32)>,
        fail: bool,
    ) -> (FakeDocument, FakeFactory, Journal) {
        let journal = Journal::default();
        let host = FakeDocument {
            canvases,
            journal: journal.clone(),
        };
        let factory = FakeFactory {
            fail,
            journal: journal.clone(),
        };
        (host, factory, journal)
    }

    #[test]
    fn adds_object_42_once_after_construction() {
        let (host, factory, journal) = setup(vec![("viewer", 7)], false);

        pollster::block_on(boot(&host, &factory, &BootOptions::default())).unwrap();

        assert_eq!(
            *journal.borrow(),
            vec![
                Event::Lookup("viewer".to_owned()),
                Event::Constructed(7),
                Event::Added(42),
            ]
        );
    }

    #[test]
    fn missing_canvas_never_constructs() {
        let (host, factory, journal) = setup(vec![("other", 1)], false);

        let err = pollster::block_on(boot(&host, &factory, &BootOptions::default()))
            .err()
            .unwrap();

        assert!(matches!(err, BootError::MissingCanvas(ref id) if id == "viewer"));
        assert_eq!(*journal.borrow(), vec![Event::Lookup("viewer".to_owned())]);
    }

    #[test]
    fn factory_failure_adds_nothing() {
        let (host, factory, journal) = setup(vec![("viewer", 3)], true);

        let err = pollster::block_on(boot(&host, &factory, &BootOptions::default()))
            .err()
            .unwrap();

        assert_eq!(err.to_string(), "viewer construction failed: no WebGL2");
        assert!(!journal
            .borrow()
            .iter()
            .any(|e| matches!(e, Event::Added(_))));
    }

    #[test]
    fn custom_canvas_and_objects() {
        let (host, factory, journal) = setup(vec![("scene", 2)], false);
        let options = BootOptions {
            canvas_id: "scene".to_owned(),
            objects: vec![1, 2, 3],
        };

        pollster::block_on(boot(&host, &factory, &options)).unwrap();

        assert_eq!(
            journal.borrow()[1..],
            [
                Event::Constructed(2),
                Event::Added(1),
                Event::Added(2),
                Event::Added(3),
            ]
        );
    }
}
