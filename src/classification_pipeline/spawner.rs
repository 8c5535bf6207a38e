use std::io;
#[cfg(test)]
use std::sync::Mutex;

pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Starts background work off the UI-owning thread.
pub trait Spawner: Send + Sync {
    fn spawn(&self, name: &str, job: Job) -> io::Result<()>;
}

pub struct ThreadSpawner;

impl Spawner for ThreadSpawner {
    fn spawn(&self, name: &str, job: Job) -> io::Result<()> {
        std::thread::Builder::new()
            .name(name.to_string())
            .spawn(job)
            .map(|_| ())
    }
}

#[cfg(test)]
pub struct FailingSpawner;

#[cfg(test)]
impl Spawner for FailingSpawner {
    fn spawn(&self, _name: &str, _job: Job) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::WouldBlock,
            "thread limit reached",
        ))
    }
}

/// Holds jobs until the test runs them, so it can look at a task before the
/// background work has happened.
#[cfg(test)]
#[derive(Default)]
pub struct ManualSpawner {
    jobs: Mutex<Vec<Job>>,
}

#[cfg(test)]
impl ManualSpawner {
    pub fn run_all(&self) -> usize {
        let jobs: Vec<Job> = self.jobs.lock().unwrap().drain(..).collect();
        let count = jobs.len();
        for job in jobs {
            job();
        }
        count
    }
}

#[cfg(test)]
impl Spawner for ManualSpawner {
    fn spawn(&self, _name: &str, job: Job) -> io::Result<()> {
        self.jobs.lock().unwrap().push(job);
        Ok(())
    }
}
