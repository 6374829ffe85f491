use bytemuck::{Pod, Zeroable};
use gl::types::*;
use std::mem;
use std::ptr;

/// A 2D position, uploaded as attribute 0.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
}

impl Vertex {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { position: [x, y] }
    }
}

pub struct VertexArray {
    id: GLuint,
}

impl VertexArray {
    pub fn new() -> Self {
        let mut id = 0;
        unsafe {
            gl::GenVertexArrays(1, &mut id);
        }
        Self { id }
    }

    pub fn bind(&self) {
        unsafe {
            gl::BindVertexArray(self.id);
        }
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteVertexArrays(1, &self.id);
        }
    }
}

/// A static GL buffer object. Leaves the buffer bound to `target`.
pub struct Buffer {
    id: GLuint,
    target: GLenum,
}

impl Buffer {
    pub fn new<T: Pod>(target: GLenum, data: &[T]) -> Self {
        let bytes: &[u8] = bytemuck::cast_slice(data);

        let mut id = 0;
        unsafe {
            gl::GenBuffers(1, &mut id);
            gl::BindBuffer(target, id);
            gl::BufferData(
                target,
                bytes.len() as GLsizeiptr,
                bytes.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );
        }

        Self { id, target }
    }

    pub fn bind(&self) {
        unsafe {
            gl::BindBuffer(self.target, self.id);
        }
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.id);
        }
    }
}

/// Static geometry drawn as a triangle list, indexed or not.
pub struct Mesh {
    vertex_array: VertexArray,
    _vertex_buffer: Buffer,
    index_buffer: Option<Buffer>,
    count: GLsizei,
}

impl Mesh {
    pub fn new(vertices: &[Vertex], indices: Option<&[u32]>) -> Self {
        let vertex_array = VertexArray::new();
        vertex_array.bind();

        let vertex_buffer = Buffer::new(gl::ARRAY_BUFFER, vertices);
        unsafe {
            gl::EnableVertexAttribArray(0);
            gl::VertexAttribPointer(
                0,
                2,
                gl::FLOAT,
                gl::FALSE,
                mem::size_of::<Vertex>() as GLsizei,
                ptr::null(),
            );
        }

        // Bound while the VAO is, so the VAO keeps the element binding.
        let index_buffer = indices.map(|indices| Buffer::new(gl::ELEMENT_ARRAY_BUFFER, indices));

        let count = indices.map_or(vertices.len(), <[u32]>::len) as GLsizei;
        log::debug!(
            "Uploaded {} vertices ({})",
            vertices.len(),
            if index_buffer.is_some() { "indexed" } else { "arrays" }
        );

        Self {
            vertex_array,
            _vertex_buffer: vertex_buffer,
            index_buffer,
            count,
        }
    }

    pub fn draw(&self) {
        self.vertex_array.bind();
        unsafe {
            match self.index_buffer {
                Some(_) => gl::DrawElements(gl::TRIANGLES, self.count, gl::UNSIGNED_INT, ptr::null()),
                None => gl::DrawArrays(gl::TRIANGLES, 0, self.count),
            }
        }
    }
}
