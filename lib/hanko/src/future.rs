use crate::error::{BoxError, Error};
use pin_project_lite::pin_project;
use std::{
    future::Future,
    pin::Pin,
    task::{self, Poll},
};

pin_project! {
    #[project = ResponseFutureProj]
    pub enum ResponseFuture<F> {
        Rejected {
            error: Option<Error>,
        },
        Inner {
            #[pin]
            inner: F,
        },
    }
}

impl<F> ResponseFuture<F> {
    pub(crate) fn rejected(error: Error) -> Self {
        Self::Rejected { error: Some(error) }
    }

    pub(crate) fn inner(inner: F) -> Self {
        Self::Inner { inner }
    }
}

impl<F, T, E> Future for ResponseFuture<F>
where
    F: Future<Output = Result<T, E>>,
    E: Into<BoxError>,
{
    type Output = Result<T, BoxError>;

    fn poll(self: Pin<&mut Self>, cx: &mut task::Context<'_>) -> Poll<Self::Output> {
        match self.project() {
            ResponseFutureProj::Rejected { error } => {
                let error = error.take().expect("future polled after completion");
                Poll::Ready(Err(error.into()))
            }
            ResponseFutureProj::Inner { inner } => inner.poll(cx).map_err(Into::into),
        }
    }
}
